pub mod limits {

    /// Fixed page size for catalog search.
    pub const SEARCH_LIMIT: usize = 10;
}

pub mod assets {

    pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
}
