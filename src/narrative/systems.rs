//! Story request lifecycle
//!
//! The narrative call is the one genuinely asynchronous operation in the app.
//! A request moves the work onto a worker thread and parks a receiver in
//! [`StoryState`]; the poll system clears that receiver (re-enabling the
//! generate control) on success, service error, timeout and worker death
//! alike, so the UI can never get stuck "generating".

use crate::game::events::ResetRequested;
use crate::game::RulesEngine;
use crate::narrative::client::{NarrativeClient, StoryRequest, StoryTheme};
use crate::narrative::error::NarrativeError;
use bevy::prelude::*;
use crossbeam_channel::{Receiver, TryRecvError};

/// Generate a story for the current game in the given theme.
#[derive(Message, Debug, Clone, Copy)]
pub struct StoryRequested {
    pub theme: StoryTheme,
}

/// Resource holding the story box contents and the in-flight request, if any.
#[derive(Resource, Default)]
pub struct StoryState {
    /// What the story box displays (story text or a `//`-prefixed notice)
    pub text: String,
    pending: Option<Receiver<Result<String, NarrativeError>>>,
}

impl StoryState {
    /// True while a request is in flight; the generate control is disabled.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

pub fn handle_story_requests(
    mut requests: MessageReader<StoryRequested>,
    client: Option<Res<NarrativeClient>>,
    engine: Res<RulesEngine>,
    mut story: ResMut<StoryState>,
) {
    for request in requests.read() {
        if story.is_busy() {
            debug!("[STORY] Request dropped, one already in flight");
            continue;
        }

        let pgn = engine.pgn();
        if pgn.is_empty() {
            story.text =
                "// No moves yet. Play a few moves before generating a story.".to_string();
            continue;
        }

        let Some(client) = client.as_deref() else {
            story.text = "// Error: story service is not configured.".to_string();
            continue;
        };

        let client = client.clone();
        let theme = request.theme;
        let payload = StoryRequest::for_current_game(pgn);
        let (sender, receiver) = crossbeam_channel::bounded(1);
        std::thread::spawn(move || {
            let result = client.generate(theme, &payload);
            let _ = sender.send(result);
        });

        story.pending = Some(receiver);
        story.text = "// Generating story...".to_string();
        info!("[STORY] Requested {} narration", theme.label());
    }
}

pub fn poll_story_results(mut story: ResMut<StoryState>) {
    let Some(receiver) = story.pending.as_ref() else {
        return;
    };
    let outcome = match receiver.try_recv() {
        Ok(result) => result,
        Err(TryRecvError::Empty) => return,
        // Worker died without sending; treat like any other failure
        Err(TryRecvError::Disconnected) => Err(NarrativeError::WorkerDied),
    };

    story.pending = None;
    match outcome {
        Ok(text) => {
            info!("[STORY] Story received ({} chars)", text.len());
            story.text = text;
        }
        Err(err) => {
            warn!("[STORY] {}", err);
            story.text = format!("// Error: {err}");
        }
    }
}

/// A new game empties the story box.
pub fn clear_story_on_reset(
    mut resets: MessageReader<ResetRequested>,
    mut story: ResMut<StoryState>,
) {
    for _ in resets.read() {
        story.text.clear();
    }
}
