// Copyright (C) 2020-2024 Andy Kurnia.

use super::game_state;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    Initialize,
    TilePlaced,
    Board,
    NoAdjacentTiles,
    NoWordFound,
    InvalidWord,
    CenterNotCovered,
    WordSubmitted,
    NextTurn,
    FirstTurn,
    GameOver,
    ResetTiles,
    ToggleMessages,
    TimerModeChanged,
    ResetTimer,
}

impl Event {
    pub fn name(self) -> &'static str {
        match self {
            Event::Initialize => "initialize",
            Event::TilePlaced => "tilePlaced",
            Event::Board => "board",
            Event::NoAdjacentTiles => "noAdjacentTiles",
            Event::NoWordFound => "noWordFound",
            Event::InvalidWord => "invalidWord",
            Event::CenterNotCovered => "centerNotCovered",
            Event::WordSubmitted => "wordSubmitted",
            Event::NextTurn => "nextTurn",
            Event::FirstTurn => "firstTurn",
            Event::GameOver => "gameOver",
            Event::ResetTiles => "resetTiles",
            Event::ToggleMessages => "toggleMessages",
            Event::TimerModeChanged => "timerModeChanged",
            Event::ResetTimer => "resetTimer",
        }
    }

    // pop-up style events, silenced while messages are off.
    pub fn is_message(self) -> bool {
        matches!(
            self,
            Event::NoAdjacentTiles
                | Event::NoWordFound
                | Event::InvalidWord
                | Event::CenterNotCovered
                | Event::FirstTurn
                | Event::GameOver
        )
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            Event::NoAdjacentTiles => Some("Word not adjacent! Please try again."),
            Event::NoWordFound => Some("No new word found! Please try again."),
            Event::InvalidWord => Some("Invalid word! Please try again."),
            Event::CenterNotCovered => {
                Some("First word must be placed covering the center square.")
            }
            Event::FirstTurn => Some("Human must play first."),
            Event::GameOver => Some("Game Over!"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Observer: Send {
    fn update(&mut self, event: Event, state: &game_state::GameState);
}

impl<F: FnMut(Event, &game_state::GameState) + Send> Observer for F {
    fn update(&mut self, event: Event, state: &game_state::GameState) {
        self(event, state)
    }
}

#[derive(Default)]
pub struct Observers(Vec<Box<dyn Observer>>);

impl Observers {
    pub fn add(&mut self, observer: Box<dyn Observer>) {
        self.0.push(observer);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn notify(&mut self, event: Event, state: &game_state::GameState) {
        if event.is_message() && !state.display_messages {
            tracing::trace!(%event, "message suppressed");
            return;
        }
        tracing::trace!(%event, observers = self.0.len(), "notify");
        for observer in self.0.iter_mut() {
            observer.update(event, state);
        }
    }
}

// records event names, handy for tests and the shell's verbose mode.
#[derive(Clone, Default)]
pub struct EventLog(pub std::sync::Arc<std::sync::Mutex<Vec<Event>>>);

impl EventLog {
    pub fn events(&self) -> Vec<Event> {
        match self.0.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.0.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl Observer for EventLog {
    fn update(&mut self, event: Event, _state: &game_state::GameState) {
        match self.0.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bag, matrix};

    #[test]
    fn every_message_event_has_text() {
        let all = [
            Event::Initialize,
            Event::TilePlaced,
            Event::Board,
            Event::NoAdjacentTiles,
            Event::NoWordFound,
            Event::InvalidWord,
            Event::CenterNotCovered,
            Event::WordSubmitted,
            Event::NextTurn,
            Event::FirstTurn,
            Event::GameOver,
            Event::ResetTiles,
            Event::ToggleMessages,
            Event::TimerModeChanged,
            Event::ResetTimer,
        ];
        for event in all {
            assert_eq!(event.is_message(), event.message().is_some(), "{}", event);
        }
        assert_eq!(Event::CenterNotCovered.to_string(), "centerNotCovered");
    }

    #[test]
    fn messages_are_dropped_while_silenced() {
        let mut state = game_state::GameState::new(matrix::Dim::new(5), bag::Bag(Vec::new()), 7);
        let log = EventLog::default();
        let seen = std::sync::Arc::new(std::sync::Mutex::new(0));
        let counter = seen.clone();
        let mut observers = Observers::default();
        observers.add(Box::new(log.clone()));
        observers.add(Box::new(move |_: Event, _: &game_state::GameState| {
            *counter.lock().unwrap() += 1;
        }));
        assert_eq!(observers.len(), 2);

        state.display_messages = false;
        observers.notify(Event::InvalidWord, &state);
        observers.notify(Event::Board, &state);
        state.display_messages = true;
        observers.notify(Event::GameOver, &state);
        assert_eq!(log.events(), vec![Event::Board, Event::GameOver]);
        assert_eq!(*seen.lock().unwrap(), 2);
        log.clear();
        assert!(log.events().is_empty());
    }
}
