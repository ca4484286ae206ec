use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Members::AccountId).string_len(100))
                    .col(ColumnDef::new(Members::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Members::PositionId).integer().not_null())
                    .col(ColumnDef::new(Members::Address).string_len(255))
                    .col(ColumnDef::new(Members::PhoneNumber).string_len(50))
                    .col(ColumnDef::new(Members::Email).string_len(255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_account_id")
                            .from(Members::Table, Members::AccountId)
                            .to(Accounts::Table, Accounts::Username)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_position_id")
                            .from(Members::Table, Members::PositionId)
                            .to(Positions::Table, Positions::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .name("idx_member_account_id")
                    .table(Members::Table)
                    .col(Members::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_position_id")
                    .table(Members::Table)
                    .col(Members::PositionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Members {
    #[sea_orm(iden = "tbl_member")]
    Table,
    Id,
    AccountId,
    Name,
    PositionId,
    Address,
    PhoneNumber,
    Email,
}

#[derive(DeriveIden)]
enum Accounts {
    #[sea_orm(iden = "tbl_account")]
    Table,
    Username,
}

#[derive(DeriveIden)]
enum Positions {
    #[sea_orm(iden = "tbl_position")]
    Table,
    Id,
}
