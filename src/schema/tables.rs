/// Table for client feedback on storyboard scenes.
#[rustfmt::skip]
pub const COMMENTS:      &str = "storyboard_comments";
/// Table for per-storyboard access records.
#[rustfmt::skip]
pub const ACCESS:        &str = "storyboard_access";
/// View over comments used by the admin dashboard, newest first.
#[rustfmt::skip]
pub const COMMENTS_VIEW: &str = "storyboard_comments_view";
/// Catalog schema the tables are created in.
#[rustfmt::skip]
pub const NAMESPACE:     &str = "public";

/// Tables the bootstrap routine expects to find after running the schema.
pub const EXPECTED: [&str; 2] = [COMMENTS, ACCESS];
