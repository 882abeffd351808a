/// Onboarding tips known to the web client
pub const ONBOARDING_KEYS: [&str; 6] = [
    "WELCOME",
    "FEATURE_RELEASES",
    "FEATURE_ABSENCE",
    "FEATURE_CALENDAR",
    "TOUR_HOME",
    "TOUR_ABSENCE",
];
