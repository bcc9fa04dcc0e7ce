//! The four demo buttons and the request each one makes.

use clap::ValueEnum;

/// One demo button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Scenario {
    /// Array body, limit 1.
    #[value(name = "good-data")]
    GoodUrlGoodData,
    /// Resource that does not exist.
    #[value(name = "bad-url")]
    BadUrl,
    /// Object body, limit 1.
    #[value(name = "bad-data")]
    GoodUrlBadData,
    /// Negative limit; the request is never made.
    #[value(name = "bad-arg")]
    GoodUrlGoodDataBadArg,
}

impl Scenario {
    /// All buttons, in display order.
    pub const ALL: [Scenario; 4] = [
        Scenario::GoodUrlGoodData,
        Scenario::BadUrl,
        Scenario::GoodUrlBadData,
        Scenario::GoodUrlGoodDataBadArg,
    ];

    /// Returns the button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::GoodUrlGoodData => "Good URL Good Data",
            Scenario::BadUrl => "Bad URL",
            Scenario::GoodUrlBadData => "Good URL, Bad Data",
            Scenario::GoodUrlGoodDataBadArg => "Good URL, Good Data, bad Arg",
        }
    }

    /// Returns the resource, relative to the configured base URL.
    pub fn resource(&self) -> &'static str {
        match self {
            Scenario::GoodUrlGoodData => "gooddata.json",
            Scenario::BadUrl => "badurl.json",
            Scenario::GoodUrlBadData => "baddata.json",
            // Misspelled on purpose: the limit check fails before the
            // resource is ever requested.
            Scenario::GoodUrlGoodDataBadArg => "goodata.json",
        }
    }

    /// Returns the emission limit.
    pub fn limit(&self) -> i64 {
        match self {
            Scenario::GoodUrlGoodDataBadArg => -1,
            _ => 1,
        }
    }
}
