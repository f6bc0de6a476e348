use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(requestlog_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RequestLog::Table).to_owned())
            .await
    }
}

/// `CREATE TABLE IF NOT EXISTS requestlog`.
pub fn requestlog_table() -> TableCreateStatement {
    Table::create()
        .table(RequestLog::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(RequestLog::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(RequestLog::Request).json().not_null())
        .to_owned()
}

#[derive(DeriveIden)]
enum RequestLog {
    #[sea_orm(iden = "requestlog")]
    Table,
    Id,
    Request,
}
