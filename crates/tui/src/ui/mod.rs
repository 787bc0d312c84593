pub mod keymap;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::AppState;
use api_types::bank::BankView;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(frame.area());

    render_info_bar(frame, layout[0], state, &theme);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(layout[1]);

    render_list(frame, content[0], state, &theme);
    render_detail(frame, content[1], state, &theme);
    render_bottom_bar(frame, layout[2], &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let (total, page, pages) = state
        .pagination
        .map(|p| (p.total, p.page, p.pages))
        .unwrap_or((0, 1, 0));

    let mut line = vec![
        Span::styled("Minar", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("Masjids", Style::default().fg(theme.dim)),
        Span::raw(format!(": {total}  ")),
        Span::styled("Page", Style::default().fg(theme.dim)),
        Span::raw(format!(": {page}/{pages}  ")),
        Span::styled("Server", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.base_url)),
    ];
    if let Some(err) = state.error.as_ref() {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items: Vec<ListItem> = state
        .masjids
        .iter()
        .map(|masjid| {
            ListItem::new(Line::from(vec![
                Span::raw(masjid.name.clone()),
                Span::styled(
                    format!("  {}", masjid.city),
                    Style::default().fg(theme.dim),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if !state.masjids.is_empty() {
        list_state.select(Some(state.selected.min(state.masjids.len() - 1)));
    }

    let block = Block::default()
        .title("Masjids")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title("Detail")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    let Some(masjid) = state.selected_masjid() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No masjid selected.",
                Style::default().fg(theme.dim),
            )))
            .block(block),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            masjid.name.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(masjid.address.clone()),
        Line::from(format!(
            "{}, {} {}",
            masjid.city, masjid.state, masjid.zip_code
        )),
        Line::from(masjid.country.clone()),
    ];
    for (label, value) in [
        ("Phone", masjid.phone.as_ref()),
        ("Email", masjid.email.as_ref()),
        ("Website", masjid.website.as_ref()),
    ] {
        if let Some(value) = value {
            lines.push(Line::from(vec![
                Span::styled(label, Style::default().fg(theme.dim)),
                Span::raw(format!(": {value}")),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Bank accounts",
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )));

    if masjid.banks.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No bank accounts on file.",
            Style::default().fg(theme.dim),
        )));
    }
    for bank in &masjid.banks {
        lines.extend(bank_lines(bank, state, theme));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn bank_lines(bank: &BankView, state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::raw(format!("  {}", bank.name)),
        Span::styled(
            format!("  ···{}", last4(&bank.account_number)),
            Style::default().fg(theme.dim),
        ),
    ])];

    match bank.latest_deposit.as_ref() {
        Some(deposit) => {
            let date = deposit
                .deposit_date
                .with_timezone(&state.timezone)
                .format("%Y-%m-%d");
            let mut spans = vec![
                Span::styled(
                    format!("    {}", format_amount(deposit.amount_minor)),
                    Style::default().fg(theme.positive),
                ),
                Span::raw(format!(" on {date}")),
            ];
            if let Some(description) = deposit.description.as_ref() {
                spans.push(Span::styled(
                    format!("  {description}"),
                    Style::default().fg(theme.dim),
                ));
            }
            lines.push(Line::from(spans));
        }
        None => lines.push(Line::from(Span::styled(
            "    No deposits yet",
            Style::default().fg(theme.dim),
        ))),
    }

    lines
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let parts = vec![
        Span::styled("↑/↓", Style::default().fg(theme.accent)),
        Span::raw(" select  "),
        Span::styled("n/p", Style::default().fg(theme.accent)),
        Span::raw(" page  "),
        Span::styled("r", Style::default().fg(theme.accent)),
        Span::raw(" refresh  "),
        Span::styled("q", Style::default().fg(theme.accent)),
        Span::raw(" quit"),
    ];
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn last4(account_number: &str) -> &str {
    let len = account_number.len();
    &account_number[len.saturating_sub(4)..]
}

fn format_amount(amount_minor: i64) -> String {
    format!("${}.{:02}", amount_minor / 100, (amount_minor % 100).abs())
}
