//! Naming transforms for generated identifiers.
//!
//! All of these are pure string derivations; the schema itself only
//! carries raw table and column names.

use heck::{ToKebabCase, ToLowerCamelCase, ToUpperCamelCase};

/// Derive a model class name from a table name (`order_item` -> `OrderItem`).
pub fn model_name(table_name: &str) -> String {
    table_name.to_upper_camel_case()
}

/// Derive an association key from a model name (`OrderItem` -> `orderItem`).
pub fn association_key(model_name: &str) -> String {
    model_name.to_lower_camel_case()
}

/// Derive a dash-connected URL segment from a model name
/// (`OrderItem` -> `order-item`), used by the legacy ExtJS3 form.
pub fn camel_to_dash(model_name: &str) -> String {
    model_name.to_kebab_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_name_from_snake_case() {
        assert_eq!(model_name("order_item"), "OrderItem");
        assert_eq!(model_name("users"), "Users");
    }

    #[test]
    fn association_key_lowers_first_segment() {
        assert_eq!(association_key("OrderItem"), "orderItem");
        assert_eq!(association_key("User"), "user");
    }

    #[test]
    fn dash_form_splits_camel_humps() {
        assert_eq!(camel_to_dash("OrderItem"), "order-item");
        assert_eq!(camel_to_dash("User"), "user");
    }
}
