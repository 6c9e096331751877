//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod products;
pub mod session;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List every product, or one category.
    List {
        /// Only products in this main category.
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Homepage featured products.
    Featured,
    /// Best selling products.
    BestSellers,
    /// New arrivals.
    New,
    /// Show one product.
    Show {
        /// Product SKU.
        id: String,
    },
    /// List catalog colors.
    Colors,
    /// List catalog categories.
    Categories,
    /// Products related to one product.
    Related {
        /// Product SKU.
        id: String,
    },
    /// Warm the startup queries and report which ones loaded.
    Prefetch {
        /// Category section to warm.
        #[arg(long, default_value = "Jeans")]
        category: String,
        /// Product whose related items are warmed.
        #[arg(long, default_value = "IRT-DJ-001")]
        related: String,
    },
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Category filter (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Color filter (repeatable).
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Size filter (repeatable).
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Lowest display price, in major units.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Highest display price, in major units.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// newest, price-low, price-high or unsorted.
    #[arg(short, long, default_value = "newest")]
    pub sort: String,

    /// Page number.
    #[arg(short, long, default_value = "1")]
    pub page: i64,

    /// Items per page (defaults to store.items_per_page).
    #[arg(long)]
    pub per_page: Option<i64>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add a product variant.
    Add {
        /// Product SKU.
        id: String,
        #[arg(short, long)]
        size: String,
        #[arg(short, long)]
        color: String,
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set the quantity of a line; 0 removes it.
    Update {
        /// Line id, as shown by `cart show`.
        line: String,
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Line id, as shown by `cart show`.
        line: String,
    },
    /// Empty the cart.
    Clear,
    /// Apply a coupon code.
    Coupon { code: String },
    /// Remove the applied coupon.
    Uncoupon,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,

    /// cod or sslcommerz.
    #[arg(long, default_value = "cod")]
    pub payment: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders placed in this session.
    List,
    /// Show one order.
    Show {
        /// Order number.
        id: String,
    },
    /// Show the tracking timeline of an order.
    Track {
        /// Order number or tracking id (at least 8 characters).
        reference: String,
    },
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Manage catalog products.
    Products {
        #[command(subcommand)]
        command: AdminProductsCommand,
    },
    /// Orders table with status counts.
    Orders {
        /// Search by order number, customer or email.
        #[arg(short, long, default_value = "")]
        search: String,
        /// pending, processing, shipped, delivered or cancelled.
        #[arg(long)]
        status: Option<String>,
    },
    /// Move an order to its next status.
    Advance {
        /// Order number.
        id: String,
        /// Tracking id, required when the order ships.
        #[arg(long)]
        tracking: Option<String>,
    },
    /// Cancel an order.
    Cancel {
        /// Order number.
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Customers derived from orders.
    Customers {
        #[arg(short, long, default_value = "")]
        search: String,
        /// active or inactive.
        #[arg(long)]
        status: Option<String>,
    },
}

/// Product fields shared by create and update.
#[derive(Args, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Base price, in major units.
    #[arg(long)]
    pub price: Option<f64>,
    /// Sale price, in major units.
    #[arg(long)]
    pub sale_price: Option<f64>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub stock: Option<i64>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub best_seller: Option<bool>,
    #[arg(long)]
    pub new_arrival: Option<bool>,
}

#[derive(Subcommand)]
pub enum AdminProductsCommand {
    /// Product table with search, category and low stock filters.
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        category: Option<String>,
        /// Only products at or below this stock level.
        #[arg(long)]
        low_stock: Option<i64>,
    },
    /// Create a product.
    Create {
        #[arg(long)]
        sku: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Update fields of a product.
    Update {
        /// Product SKU.
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product SKU.
        id: String,
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Set a config value in the config file.
    Set {
        /// Dotted key, e.g. api.base_url or store.shipping_fee.
        key: String,
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show where the session is saved and what it holds.
    Show,
    /// Forget the cart, coupon and placed orders.
    Reset {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}
