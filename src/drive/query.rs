//! `files.list` query construction.

use std::fmt;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size Drive accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// A single search predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exclude trashed objects.
    NotTrashed,
    /// Only objects owned by the authenticated account.
    OwnedByCaller,
    /// Only direct children of the given folder.
    ParentEquals(String),
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::NotTrashed => f.write_str("trashed = false"),
            Predicate::OwnedByCaller => f.write_str("'me' in owners"),
            Predicate::ParentEquals(id) => write!(f, "'{}' in parents", escape_literal(id)),
        }
    }
}

/// Escape a value for use inside a single-quoted query literal.
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// A `files.list` request for one page of a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    predicates: Vec<Predicate>,
    fields: String,
    order_by: String,
    page_size: u32,
    page_token: Option<String>,
}

impl ListingQuery {
    /// Query for the non-trashed, caller-owned children of `folder_id`.
    pub fn for_folder(folder_id: impl Into<String>) -> Self {
        Self {
            predicates: vec![
                Predicate::NotTrashed,
                Predicate::OwnedByCaller,
                Predicate::ParentEquals(folder_id.into()),
            ],
            fields: "id,name,mimeType,size,webContentLink".to_string(),
            order_by: "folder,name".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_token: None,
        }
    }

    /// Set the per-record field projection.
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Set the ordering.
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Set the page size, clamped to what Drive accepts.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Continue from a previous page. Empty tokens are ignored.
    pub fn with_page_token(mut self, page_token: Option<&str>) -> Self {
        self.page_token = page_token
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// Predicates in the order they are joined.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The `q` parameter.
    pub fn q(&self) -> String {
        self.predicates
            .iter()
            .map(Predicate::to_string)
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// The `fields` parameter.
    pub fn fields_param(&self) -> String {
        format!("files({}), nextPageToken", self.fields)
    }

    /// Ordering.
    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    /// Page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Continuation token, if any.
    pub fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    /// All query-string parameters for the request.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.q()),
            ("fields", self.fields_param()),
            ("orderBy", self.order_by.clone()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(token) = &self.page_token {
            params.push(("pageToken", token.clone()));
        }
        params
    }
}
