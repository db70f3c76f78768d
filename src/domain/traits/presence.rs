use crate::domain::entities::Activity;

/// Anything that can change the bot's displayed activity
pub trait PresenceSink: Send + Sync {
    fn set_activity(&self, activity: &Activity);
}
