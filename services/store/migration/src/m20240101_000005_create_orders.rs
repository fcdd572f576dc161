use sea_orm_migration::prelude::*;

use furniture_domain::order::{OrderStatus, OrderType, PaymentMethod, PaymentStatus};

use crate::one_of;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Orders::OrderType)
                            .string_len(20)
                            .not_null()
                            .check(one_of(
                                Orders::OrderType,
                                OrderType::ALL.iter().map(|t| t.as_str()),
                            )),
                    )
                    .col(ColumnDef::new(Orders::Customer).json_binary().not_null())
                    .col(ColumnDef::new(Orders::ConsultationDetails).json_binary())
                    .col(
                        ColumnDef::new(Orders::TotalAmount)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0)
                            .check(Expr::col(Orders::TotalAmount).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(20)
                            .not_null()
                            .default(OrderStatus::default().as_str())
                            .check(one_of(
                                Orders::Status,
                                OrderStatus::ALL.iter().map(|s| s.as_str()),
                            )),
                    )
                    .col(
                        ColumnDef::new(Orders::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default(PaymentStatus::default().as_str())
                            .check(one_of(
                                Orders::PaymentStatus,
                                PaymentStatus::ALL.iter().map(|s| s.as_str()),
                            )),
                    )
                    .col(
                        ColumnDef::new(Orders::PaymentMethod)
                            .string_len(20)
                            .not_null()
                            .default(PaymentMethod::default().as_str())
                            .check(one_of(
                                Orders::PaymentMethod,
                                PaymentMethod::ALL.iter().map(|m| m.as_str()),
                            )),
                    )
                    .col(ColumnDef::new(Orders::Notes).text())
                    .col(ColumnDef::new(Orders::StaffNotes).text())
                    .col(ColumnDef::new(Orders::AssignedStaffId).integer())
                    .col(
                        ColumnDef::new(Orders::StatusHistory)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_assigned_staff_id")
                            .from(Orders::Table, Orders::AssignedStaffId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    OrderType,
    Customer,
    ConsultationDetails,
    TotalAmount,
    Status,
    PaymentStatus,
    PaymentMethod,
    Notes,
    StaffNotes,
    AssignedStaffId,
    StatusHistory,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
