pub struct Icons;

impl Icons {
    pub const BOOK: &str = "📚";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const TAG: &str = "🏷️";
    pub const DATABASE: &str = "🗄️";
    pub const CALENDAR: &str = "📅";
    pub const CAMERA: &str = "📸";
    pub const SPARKLE: &str = "✨";
    pub const STAR: &str = "⭐";
}
