//! The construction module contains the greedy yard template constructor.

mod preference;
pub use self::preference::Preferences;

mod template;
pub use self::template::YardTemplateHeuristic;
