pub use super::event::Entity as Event;
pub use super::location::Entity as Location;
pub use super::organization::Entity as Organization;
pub use super::person::Entity as Person;
pub use super::room::Entity as Room;
pub use super::talk::Entity as Talk;
pub use super::talk_date::Entity as TalkDate;
pub use super::talk_person::Entity as TalkPerson;
pub use super::talk_topic::Entity as TalkTopic;
pub use super::topic::Entity as Topic;
