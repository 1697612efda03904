//! Announcement content for the two cycle transitions.

/// Title and body of a transition announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnounceContent {
    /// Notification title
    pub title: &'static str,
    /// Notification body
    pub body: &'static str,
}

/// Content announcing the start of a rest interval.
pub fn rest_started_content() -> AnnounceContent {
    AnnounceContent {
        title: "Time to Rest! 🧘",
        body: "Look at something 20 feet (6 meters) away for 20 seconds. \
               Your eyes will thank you!",
    }
}

/// Content announcing the return to a work interval.
pub fn work_started_content() -> AnnounceContent {
    AnnounceContent {
        title: "Back to Work! 💻",
        body: "Rest time is over. Get back to focusing on your task.",
    }
}
