use crate::types::Platform;

/// Static per-platform table of assumed current best practices.
///
/// Not derived from live data: this is the shared background both the prompt
/// builder and the fallback generator draw on.
pub struct MarketContext {
    pub trending_formats: &'static [&'static str],
    pub popular_categories: &'static [&'static str],
    pub peak_times: &'static [&'static str],
    pub hashtags: &'static [&'static str],
    pub algorithm_preference: &'static str,
}

static INSTAGRAM: MarketContext = MarketContext {
    trending_formats: &["reels", "carousels", "stories"],
    popular_categories: &["lifestyle", "beauty", "fitness", "food"],
    peak_times: &["11:00-13:00", "19:00-21:00"],
    hashtags: &["#reels", "#explore", "#creator", "#trending"],
    algorithm_preference: "short-form video with high early engagement",
};

static TIKTOK: MarketContext = MarketContext {
    trending_formats: &["short video", "duets", "live"],
    popular_categories: &["entertainment", "dance", "diy", "comedy"],
    peak_times: &["12:00-15:00", "19:00-23:00"],
    hashtags: &["#fyp", "#foryou", "#viral", "#duet"],
    algorithm_preference: "completion rate and rewatches over follower count",
};

static YOUTUBE: MarketContext = MarketContext {
    trending_formats: &["shorts", "long-form tutorials", "live streams"],
    popular_categories: &["education", "gaming", "tech", "vlogs"],
    peak_times: &["15:00-18:00", "20:00-22:00"],
    hashtags: &["#shorts", "#tutorial", "#howto", "#vlog"],
    algorithm_preference: "watch time and click-through rate",
};

/// Look up the market context for a platform. Unknown platforms read
/// Instagram's table.
pub fn market_context(platform: &Platform) -> &'static MarketContext {
    match platform {
        Platform::Instagram => &INSTAGRAM,
        Platform::Tiktok => &TIKTOK,
        Platform::Youtube => &YOUTUBE,
        Platform::Other(_) => &INSTAGRAM,
    }
}
