use super::*;
use crate::server::{
    data::talk::TalkRepository,
    model::talk::{TalkDateParams, TalkLevel, TalkParams},
};

mod create;
mod delete;
mod get_by_relation;
mod update;

fn talk_params() -> TalkParams {
    TalkParams {
        title: "Ownership in practice".to_string(),
        duration_in_minutes: 45,
        language: "en".to_string(),
        level: "advanced".to_string(),
        ..Default::default()
    }
}
