/// Keyword queries for the spam archetypes the sweep looks for: adult
/// content lures, crypto scams, generic engagement spam, UTTP raid bots.
/// Fixed and ordered; a run walks the list front to back.
pub const SEARCH_QUERIES: &[&str] = &[
    "OnlyFans free",
    "webcam girls",
    "porn telegram",
    "free bitcoin",
    "bitcoin generator",
    "crypto hack",
    "free money",
    "spam account",
    "fake account",
    "click link bio",
    "free followers",
    "sub4sub",
    "follow back",
    "spam bot",
    "UTTP raid",
    "UTTP spam",
    "UTTP destroy",
];

pub fn default_queries() -> Vec<String> {
    SEARCH_QUERIES.iter().map(|query| query.to_string()).collect()
}
