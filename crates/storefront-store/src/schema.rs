//! Table and collection names, bootstrap DDL, and result caps.
//!
//! Bootstrap is idempotent: every statement uses `IF NOT EXISTS` and
//! collections are only created when absent.

/// PostgreSQL table names.
pub mod pg {
    /// Registered users.
    pub const USERS: &str = "users";

    /// Order headers.
    pub const ORDERS: &str = "orders";

    /// Order line items, owned by `orders`.
    pub const ORDER_ITEMS: &str = "order_items";

    /// Shopping cart lines.
    pub const CART: &str = "cart";
}

/// MySQL table names.
pub mod mysql {
    /// Stock levels, unique per `product_id`.
    pub const INVENTORY: &str = "inventory";

    /// Per-product daily sales records.
    pub const SALES_ANALYTICS: &str = "sales_analytics";
}

/// MongoDB collection names.
pub mod collection {
    /// Catalog products.
    pub const PRODUCTS: &str = "products";

    /// Product reviews.
    pub const REVIEWS: &str = "reviews";

    /// Catalog categories.
    pub const CATEGORIES: &str = "categories";

    /// Saved products per user.
    pub const WISHLIST: &str = "wishlist";
}

/// Row caps applied by list operations.
pub mod limits {
    /// Users, orders, cart lines and inventory listings.
    pub const RELATIONAL_LIST: i64 = 100;

    /// Sales rows returned for a date range.
    pub const SALES_RANGE: i64 = 1000;

    /// Entries in the popular products ranking.
    pub const POPULAR_PRODUCTS: i64 = 20;

    /// Days covered by the revenue statistics window.
    pub const REVENUE_WINDOW_DAYS: i32 = 30;

    /// Products, search hits and categories.
    pub const DOCUMENT_LIST: i64 = 100;
}

/// DDL executed against PostgreSQL at startup, in dependency order.
///
/// The cart table carries no unique constraint on `(user_id, product_id)`,
/// so cart upserts fall back to a plain insert on a fresh schema.
pub const POSTGRES_BOOTSTRAP: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) UNIQUE NOT NULL,
        password VARCHAR(255) NOT NULL,
        address TEXT,
        phone VARCHAR(50),
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    r"CREATE TABLE IF NOT EXISTS orders (
        id SERIAL PRIMARY KEY,
        user_id INTEGER REFERENCES users(id),
        total_amount DECIMAL(10,2) NOT NULL,
        status VARCHAR(50) DEFAULT 'pending',
        payment_method VARCHAR(50),
        shipping_address TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    r"CREATE TABLE IF NOT EXISTS order_items (
        id SERIAL PRIMARY KEY,
        order_id INTEGER REFERENCES orders(id) ON DELETE CASCADE,
        product_id VARCHAR(100) NOT NULL,
        quantity INTEGER NOT NULL,
        price DECIMAL(10,2) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
    r"CREATE TABLE IF NOT EXISTS cart (
        id SERIAL PRIMARY KEY,
        user_id INTEGER REFERENCES users(id),
        product_id VARCHAR(100) NOT NULL,
        quantity INTEGER NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
];

/// DDL executed against MySQL at startup.
pub const MYSQL_BOOTSTRAP: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS inventory (
        id INT AUTO_INCREMENT PRIMARY KEY,
        product_id VARCHAR(100) UNIQUE NOT NULL,
        quantity INT NOT NULL DEFAULT 0,
        warehouse_location VARCHAR(255),
        last_restocked TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        low_stock_threshold INT DEFAULT 10,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
    )",
    r"CREATE TABLE IF NOT EXISTS sales_analytics (
        id INT AUTO_INCREMENT PRIMARY KEY,
        product_id VARCHAR(100) NOT NULL,
        quantity_sold INT NOT NULL,
        revenue DECIMAL(10,2) NOT NULL,
        sale_date DATE NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        INDEX idx_product_date (product_id, sale_date)
    )",
];

/// Returns all collection names for database initialization.
#[must_use]
pub fn all_collections() -> Vec<&'static str> {
    vec![
        collection::PRODUCTS,
        collection::REVIEWS,
        collection::CATEGORIES,
        collection::WISHLIST,
    ]
}

/// Single-field ascending indexes created on startup, as `(collection, field)`.
pub const COLLECTION_INDEXES: &[(&str, &str)] = &[
    (collection::REVIEWS, "product_id"),
    (collection::WISHLIST, "user_id"),
    (collection::PRODUCTS, "category"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_bootstrap_creates_parents_first() {
        let position = |table: &str| {
            POSTGRES_BOOTSTRAP
                .iter()
                .position(|ddl| ddl.contains(&format!("EXISTS {table} (")))
                .unwrap()
        };
        assert!(position(pg::USERS) < position(pg::ORDERS));
        assert!(position(pg::ORDERS) < position(pg::ORDER_ITEMS));
        assert!(position(pg::USERS) < position(pg::CART));
    }

    #[test]
    fn every_index_targets_a_known_collection() {
        let collections = all_collections();
        for (name, _) in COLLECTION_INDEXES {
            assert!(collections.contains(name));
        }
    }

    #[test]
    fn bootstrap_is_idempotent() {
        for ddl in POSTGRES_BOOTSTRAP.iter().chain(MYSQL_BOOTSTRAP) {
            assert!(ddl.contains("IF NOT EXISTS"));
        }
    }

    #[test]
    fn user_and_inventory_columns_keep_their_widths() {
        let users = POSTGRES_BOOTSTRAP[0];
        assert!(users.contains("name VARCHAR(255)"));
        assert!(users.contains("email VARCHAR(255)"));
        assert!(users.contains("phone VARCHAR(50)"));
        assert!(MYSQL_BOOTSTRAP[0].contains("warehouse_location VARCHAR(255)"));
    }

    #[test]
    fn order_items_record_their_creation_time() {
        let order_items = POSTGRES_BOOTSTRAP
            .iter()
            .find(|ddl| ddl.contains("EXISTS order_items ("))
            .unwrap();
        assert!(order_items.contains("created_at TIMESTAMP"));
    }
}
