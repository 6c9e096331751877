//! Query parameters for `GET /products`.

use kolaz_commerce::catalog::FeatureFlag;

/// Builder for product listing parameters.
///
/// A `limit` of `0` asks the backend for every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    flags: Vec<FeatureFlag>,
    category: Option<String>,
    fields: Vec<String>,
    limit: Option<u32>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every product.
    pub fn all() -> Self {
        Self::new().limit(0)
    }

    /// Only products carrying `flag`.
    pub fn flag(mut self, flag: FeatureFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Project the response down to the named fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Parameters in the order the backend documents them.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .flags
            .iter()
            .map(|f| (f.query_param().to_string(), "true".to_string()))
            .collect();
        if let Some(category) = &self.category {
            params.push(("category".to_string(), category.clone()));
        }
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_sends_limit_zero() {
        assert_eq!(ProductQuery::all().to_params(), pairs(&[("limit", "0")]));
    }

    #[test]
    fn test_flags_category_fields_and_limit() {
        let query = ProductQuery::new()
            .flag(FeatureFlag::Featured)
            .flag(FeatureFlag::Featured)
            .category("Jeans")
            .fields(["color", "category"])
            .limit(8);
        assert_eq!(
            query.to_params(),
            pairs(&[
                ("isFeatured", "true"),
                ("category", "Jeans"),
                ("fields", "color,category"),
                ("limit", "8"),
            ])
        );
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(ProductQuery::new().to_params().is_empty());
    }
}
