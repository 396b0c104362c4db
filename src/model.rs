use serde::Deserialize;

/// Fixed fallback shown wherever a product carries no description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// One catalog entry as returned by the remote API.
///
/// Every text field is optional: the API omits keys and also sends explicit
/// `null`s, and neither may be fatal. `id` is the list key, unique within a
/// single fetch result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn brand(&self) -> &str {
        self.brand.as_deref().unwrap_or("")
    }

    pub fn product_type(&self) -> &str {
        self.product_type.as_deref().unwrap_or("")
    }

    pub fn image_link(&self) -> &str {
        self.image_link.as_deref().unwrap_or("")
    }

    /// Price text for display. Absent or empty prices render as "0.00".
    pub fn price_label(&self) -> &str {
        match self.price.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => "0.00",
        }
    }

    /// Description text for display, falling back to [`NO_DESCRIPTION`].
    pub fn description_text(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => NO_DESCRIPTION,
        }
    }
}
