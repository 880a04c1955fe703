use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create party table
        manager
            .create_table(
                Table::create()
                    .table(Party::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Party::Id).string().not_null().primary_key())
                    .col(string(Party::Name))
                    .col(boolean(Party::Customer))
                    .col(boolean(Party::Supplier))
                    .col(string(Party::Category))
                    .to_owned(),
            )
            .await?;

        // Create account table
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(boolean(Account::Header))
                    .col(string(Account::Name))
                    .col(string(Account::Category))
                    .to_owned(),
            )
            .await?;

        // Create journal table
        manager
            .create_table(
                Table::create()
                    .table(Journal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Journal::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(Journal::Name))
                    .col(string(Journal::Category))
                    .to_owned(),
            )
            .await?;

        // Create document table
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Document::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(integer(Document::PeriodId))
                    .col(string(Document::JournalId))
                    .col(string(Document::Number))
                    .col(date(Document::Dt))
                    .col(string(Document::Description))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_journal")
                            .from(Document::Table, Document::JournalId)
                            .to(Journal::Table, Journal::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_document_journal_number")
                    .table(Document::Table)
                    .col(Document::JournalId)
                    .col(Document::Number)
                    .to_owned(),
            )
            .await?;

        // Create history_line table
        manager
            .create_table(
                Table::create()
                    .table(HistoryLine::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoryLine::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(big_integer(HistoryLine::DocumentId))
                    .col(string_null(HistoryLine::AccountId))
                    .col(string_null(HistoryLine::PartyId))
                    .col(decimal(HistoryLine::Debit).decimal_len(16, 2))
                    .col(decimal(HistoryLine::Credit).decimal_len(16, 2))
                    .col(boolean(HistoryLine::Tallied))
                    .col(big_integer_null(HistoryLine::TallyNumber))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_history_line_document")
                            .from(HistoryLine::Table, HistoryLine::DocumentId)
                            .to(Document::Table, Document::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_history_line_account")
                            .from(HistoryLine::Table, HistoryLine::AccountId)
                            .to(Account::Table, Account::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_history_line_party")
                            .from(HistoryLine::Table, HistoryLine::PartyId)
                            .to(Party::Table, Party::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_history_line_document")
                    .table(HistoryLine::Table)
                    .col(HistoryLine::DocumentId)
                    .to_owned(),
            )
            .await?;

        // Create kpi table
        manager
            .create_table(
                Table::create()
                    .table(Kpi::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Kpi::Id).string().not_null().primary_key())
                    .to_owned(),
            )
            .await?;

        // Create kpidata table
        manager
            .create_table(
                Table::create()
                    .table(KpiData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KpiData::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(KpiData::KpiId))
                    .col(integer(KpiData::PeriodId))
                    .col(decimal_null(KpiData::Value).decimal_len(16, 4))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_kpidata_kpi")
                            .from(KpiData::Table, KpiData::KpiId)
                            .to(Kpi::Table, Kpi::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KpiData::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Kpi::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HistoryLine::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Journal::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Party::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Party {
    Table,
    Id,
    Name,
    Customer,
    Supplier,
    Category,
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Header,
    Name,
    Category,
}

#[derive(DeriveIden)]
enum Journal {
    Table,
    Id,
    Name,
    Category,
}

#[derive(DeriveIden)]
enum Document {
    Table,
    Id,
    PeriodId,
    JournalId,
    Number,
    Dt,
    Description,
}

#[derive(DeriveIden)]
enum HistoryLine {
    Table,
    Id,
    DocumentId,
    AccountId,
    PartyId,
    Debit,
    Credit,
    Tallied,
    TallyNumber,
}

#[derive(DeriveIden)]
enum Kpi {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum KpiData {
    #[sea_orm(iden = "kpidata")]
    Table,
    Id,
    KpiId,
    PeriodId,
    Value,
}
