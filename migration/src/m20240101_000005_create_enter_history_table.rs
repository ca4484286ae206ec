use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // member_id 不建外键：闸机写入时用 -1 表示未识别人员
        manager
            .create_table(
                Table::create()
                    .table(EnterHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EnterHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EnterHistory::MemberId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EnterHistory::FaceImage)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EnterHistory::EnterAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .name("idx_enter_history_member_id")
                    .table(EnterHistory::Table)
                    .col(EnterHistory::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enter_history_enter_at")
                    .table(EnterHistory::Table)
                    .col(EnterHistory::EnterAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EnterHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EnterHistory {
    #[sea_orm(iden = "tbl_enter_history")]
    Table,
    Id,
    MemberId,
    FaceImage,
    EnterAt,
}
