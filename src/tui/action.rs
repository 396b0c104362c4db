use crate::model::Product;

/// Commands sent from the UI loop to the network task.
#[derive(Debug)]
pub enum Action {
    /// Issue the single fetch for a (re)mounted catalog screen. `seq` is the
    /// mount sequence the request belongs to.
    FetchCatalog { seq: u64 },
    Quit,
}

/// Results sent from the network task back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// The fetch for mount `seq` resolved. Failures arrive as an empty list;
    /// there is no separate error event for the catalog screen.
    CatalogLoaded { seq: u64, products: Vec<Product> },
}
