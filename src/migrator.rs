use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_balance_sheets_table::Migration),
            Box::new(m20240101_000002_create_expenses_table::Migration),
            Box::new(m20240101_000003_create_products_table::Migration),
            Box::new(m20240101_000004_create_product_deliveries_table::Migration),
            Box::new(m20240101_000005_create_warehouse_inventories_table::Migration),
            Box::new(m20240101_000006_create_employee_stocks_table::Migration),
            Box::new(m20240101_000007_create_stock_movements_table::Migration),
            Box::new(m20240101_000008_create_stock_transfers_table::Migration),
            Box::new(m20240101_000009_create_product_adjustments_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_balance_sheets_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_balance_sheets_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BalanceSheets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BalanceSheets::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::EmployeeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::ProductDeliveryAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::ExpenseAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::MarketCost)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::TaDa)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::CurrentBalance)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BalanceSheets::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_balance_sheets_employee_id")
                        .table(BalanceSheets::Table)
                        .col(BalanceSheets::EmployeeId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BalanceSheets::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum BalanceSheets {
        Table,
        Id,
        EmployeeId,
        ProductDeliveryAmount,
        ExpenseAmount,
        MarketCost,
        TaDa,
        CurrentBalance,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_expenses_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_expenses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Expenses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Expenses::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Expenses::EmployeeId).big_integer().not_null())
                        .col(ColumnDef::new(Expenses::Amount).decimal().not_null())
                        .col(ColumnDef::new(Expenses::Category).string().null())
                        .col(ColumnDef::new(Expenses::ExpenseDate).date().not_null())
                        .col(ColumnDef::new(Expenses::Notes).string().null())
                        .col(
                            ColumnDef::new(Expenses::Status)
                                .string_len(16)
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(Expenses::ApprovedBy).big_integer().null())
                        .col(ColumnDef::new(Expenses::ApprovedAt).timestamp().null())
                        .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Expenses::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_expenses_employee_id")
                        .table(Expenses::Table)
                        .col(Expenses::EmployeeId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_expenses_status")
                        .table(Expenses::Table)
                        .col(Expenses::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Expenses::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Expenses {
        Table,
        Id,
        EmployeeId,
        Amount,
        Category,
        ExpenseDate,
        Notes,
        Status,
        ApprovedBy,
        ApprovedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(
                            ColumnDef::new(Products::Sku)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Products::StockQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Products::MinimumQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::MaximumQuantity).integer().null())
                        .col(
                            ColumnDef::new(Products::UnitPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Products::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Products {
        Table,
        Id,
        Name,
        Sku,
        StockQuantity,
        MinimumQuantity,
        MaximumQuantity,
        UnitPrice,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_product_deliveries_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_product_deliveries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductDeliveries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductDeliveries::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductDeliveries::EmployeeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductDeliveries::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductDeliveries::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductDeliveries::UnitPrice)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductDeliveries::TotalAmount)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductDeliveries::DeliveredOn)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductDeliveries::Notes).string().null())
                        .col(
                            ColumnDef::new(ProductDeliveries::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductDeliveries::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_deliveries_employee_id")
                        .table(ProductDeliveries::Table)
                        .col(ProductDeliveries::EmployeeId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductDeliveries::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ProductDeliveries {
        Table,
        Id,
        EmployeeId,
        ProductId,
        Quantity,
        UnitPrice,
        TotalAmount,
        DeliveredOn,
        Notes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_warehouse_inventories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_warehouse_inventories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WarehouseInventories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WarehouseInventories::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseInventories::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseInventories::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseInventories::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseInventories::MinimumQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WarehouseInventories::MaximumQuantity)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseInventories::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WarehouseInventories::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_warehouse_inventories_warehouse_product")
                        .table(WarehouseInventories::Table)
                        .col(WarehouseInventories::WarehouseId)
                        .col(WarehouseInventories::ProductId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WarehouseInventories::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum WarehouseInventories {
        Table,
        Id,
        WarehouseId,
        ProductId,
        Quantity,
        MinimumQuantity,
        MaximumQuantity,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000006_create_employee_stocks_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_employee_stocks_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(EmployeeStocks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(EmployeeStocks::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EmployeeStocks::EmployeeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EmployeeStocks::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EmployeeStocks::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(EmployeeStocks::MinimumQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(EmployeeStocks::MaximumQuantity)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(EmployeeStocks::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EmployeeStocks::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_employee_stocks_employee_product")
                        .table(EmployeeStocks::Table)
                        .col(EmployeeStocks::EmployeeId)
                        .col(EmployeeStocks::ProductId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(EmployeeStocks::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum EmployeeStocks {
        Table,
        Id,
        EmployeeId,
        ProductId,
        Quantity,
        MinimumQuantity,
        MaximumQuantity,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_stock_movements_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_stock_movements_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockMovements::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::StockableType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::StockableId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::QuantityChange)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::QuantityBefore)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::QuantityAfter)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::MovementType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::Notes).string().null())
                        .col(
                            ColumnDef::new(StockMovements::CreatedBy)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(StockMovements::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_movements_stockable")
                        .table(StockMovements::Table)
                        .col(StockMovements::StockableType)
                        .col(StockMovements::StockableId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_movements_product_id")
                        .table(StockMovements::Table)
                        .col(StockMovements::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockMovements::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum StockMovements {
        Table,
        Id,
        StockableType,
        StockableId,
        ProductId,
        QuantityChange,
        QuantityBefore,
        QuantityAfter,
        MovementType,
        Notes,
        CreatedBy,
        CreatedAt,
    }
}

mod m20240101_000008_create_stock_transfers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_stock_transfers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockTransfers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockTransfers::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::EmployeeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockTransfers::Notes).string().null())
                        .col(
                            ColumnDef::new(StockTransfers::Status)
                                .string_len(16)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::RequestedBy)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::ApprovedBy)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(StockTransfers::ApprovedAt).timestamp().null())
                        .col(
                            ColumnDef::new(StockTransfers::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StockTransfers::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_transfers_status")
                        .table(StockTransfers::Table)
                        .col(StockTransfers::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockTransfers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum StockTransfers {
        Table,
        Id,
        WarehouseId,
        EmployeeId,
        ProductId,
        Quantity,
        Notes,
        Status,
        RequestedBy,
        ApprovedBy,
        ApprovedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000009_create_product_adjustments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_product_adjustments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductAdjustments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductAdjustments::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::Direction)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::QuantityRequested)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::QuantityAdjusted)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::PreviousQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::NewQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductAdjustments::Reason).string().null())
                        .col(
                            ColumnDef::new(ProductAdjustments::Status)
                                .string_len(16)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::RequestedBy)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::ApprovedBy)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::ApprovedAt)
                                .timestamp()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAdjustments::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_adjustments_status")
                        .table(ProductAdjustments::Table)
                        .col(ProductAdjustments::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductAdjustments::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ProductAdjustments {
        Table,
        Id,
        ProductId,
        Direction,
        QuantityRequested,
        QuantityAdjusted,
        PreviousQuantity,
        NewQuantity,
        Reason,
        Status,
        RequestedBy,
        ApprovedBy,
        ApprovedAt,
        CreatedAt,
        UpdatedAt,
    }
}
