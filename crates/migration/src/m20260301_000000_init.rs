//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Minar:
//!
//! - `masjids`: the directory entries
//! - `banks`: bank accounts owned by masjids
//! - `deposits`: deposits recorded against bank accounts

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Masjids {
    Table,
    Id,
    Name,
    Address,
    City,
    State,
    ZipCode,
    Country,
    Phone,
    Email,
    Website,
}

#[derive(Iden)]
enum Banks {
    Table,
    Id,
    Name,
    AccountNumber,
    RoutingNumber,
    Address,
    City,
    State,
    ZipCode,
    Country,
    MasjidId,
}

#[derive(Iden)]
enum Deposits {
    Table,
    Id,
    AmountMinor,
    Description,
    DepositDate,
    CreatedAt,
    UpdatedAt,
    BankId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Masjids
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Masjids::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Masjids::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Masjids::Name).string().not_null())
                    .col(ColumnDef::new(Masjids::Address).string().not_null())
                    .col(ColumnDef::new(Masjids::City).string().not_null())
                    .col(ColumnDef::new(Masjids::State).string().not_null())
                    .col(ColumnDef::new(Masjids::ZipCode).string().not_null())
                    .col(ColumnDef::new(Masjids::Country).string().not_null())
                    .col(ColumnDef::new(Masjids::Phone).string())
                    .col(ColumnDef::new(Masjids::Email).string())
                    .col(ColumnDef::new(Masjids::Website).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-masjids-name")
                    .table(Masjids::Table)
                    .col(Masjids::Name)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Banks
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Banks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Banks::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Banks::Name).string().not_null())
                    .col(ColumnDef::new(Banks::AccountNumber).string().not_null())
                    .col(ColumnDef::new(Banks::RoutingNumber).string().not_null())
                    .col(ColumnDef::new(Banks::Address).string().not_null())
                    .col(ColumnDef::new(Banks::City).string().not_null())
                    .col(ColumnDef::new(Banks::State).string().not_null())
                    .col(ColumnDef::new(Banks::ZipCode).string().not_null())
                    .col(ColumnDef::new(Banks::Country).string().not_null())
                    .col(ColumnDef::new(Banks::MasjidId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-banks-masjid_id")
                            .from(Banks::Table, Banks::MasjidId)
                            .to(Masjids::Table, Masjids::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-banks-masjid_id")
                    .table(Banks::Table)
                    .col(Banks::MasjidId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Deposits
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Deposits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deposits::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Deposits::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Deposits::Description).string())
                    .col(
                        ColumnDef::new(Deposits::DepositDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Deposits::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Deposits::UpdatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Deposits::BankId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-deposits-bank_id")
                            .from(Deposits::Table, Deposits::BankId)
                            .to(Banks::Table, Banks::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the latest-deposit-per-bank subquery.
        manager
            .create_index(
                Index::create()
                    .name("idx-deposits-bank_id-deposit_date")
                    .table(Deposits::Table)
                    .col(Deposits::BankId)
                    .col(Deposits::DepositDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Deposits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Banks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Masjids::Table).to_owned())
            .await?;
        Ok(())
    }
}
