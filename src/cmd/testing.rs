//! Scripted collaborators for exercising resolution and dispatch without a
//! backend or a terminal.

use std::cell::RefCell;

use crate::backend::Runner;
use crate::error::{Error, Result};
use crate::lister::{ListKind, Lister};
use crate::selector::{Selection, Selector};

pub fn argv(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub struct ScriptedLister {
    names: Option<Vec<String>>,
    calls: RefCell<Vec<ListKind>>,
}

impl ScriptedLister {
    pub fn ok(names: &[&str]) -> Self {
        ScriptedLister {
            names: Some(argv(names)),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        ScriptedLister {
            names: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ListKind> {
        self.calls.borrow().clone()
    }
}

impl Lister for ScriptedLister {
    fn list(&self, kind: ListKind) -> Result<Vec<String>> {
        self.calls.borrow_mut().push(kind);
        self.names.clone().ok_or_else(|| Error::BackendUnavailable {
            command: format!("juju {}", kind.listing_args().join(" ")),
            reason: "exit status: 1".into(),
        })
    }
}

enum Behaviour {
    /// Pick the first candidate, nothing on an empty list.
    First,
    /// Only resolves without interaction: exactly one candidate or none.
    AutoOnly,
    Fixed(Selection),
}

pub struct ScriptedSelector {
    behaviour: Behaviour,
    calls: RefCell<Vec<(Vec<String>, String)>>,
}

impl ScriptedSelector {
    fn with(behaviour: Behaviour) -> Self {
        ScriptedSelector {
            behaviour,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn first() -> Self {
        Self::with(Behaviour::First)
    }

    pub fn auto_only() -> Self {
        Self::with(Behaviour::AutoOnly)
    }

    pub fn returning(selection: Selection) -> Self {
        Self::with(Behaviour::Fixed(selection))
    }

    pub fn calls(&self) -> Vec<(Vec<String>, String)> {
        self.calls.borrow().clone()
    }
}

impl Selector for ScriptedSelector {
    fn select(&self, candidates: &[String], prompt_label: &str) -> Result<Selection> {
        self.calls
            .borrow_mut()
            .push((candidates.to_vec(), prompt_label.to_string()));
        let picked = match &self.behaviour {
            Behaviour::First => candidates
                .first()
                .cloned()
                .map(Selection::Selected)
                .unwrap_or(Selection::NoneSelected),
            Behaviour::AutoOnly => match candidates {
                [] => Selection::NoneSelected,
                [only] => Selection::Selected(only.clone()),
                _ => panic!("selector would need user input for {candidates:?}"),
            },
            Behaviour::Fixed(selection) => selection.clone(),
        };
        Ok(picked)
    }
}

pub struct RecordingRunner {
    exit: i32,
    calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingRunner {
    pub fn exiting(exit: i32) -> Self {
        RecordingRunner {
            exit,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl Runner for RecordingRunner {
    fn run(&self, args: &[String]) -> Result<i32> {
        self.calls.borrow_mut().push(args.to_vec());
        Ok(self.exit)
    }
}
