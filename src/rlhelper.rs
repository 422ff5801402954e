// Copyright (C) 2020-2021 Andy Kurnia.

// https://github.com/kkawakam/rustyline/blob/master/examples/example.rs

use rustyline::completion::{Completer, FilenameCompleter, Pair};

pub const COMMANDS: &[&str] = &[
    "ai", "board", "exit", "help", "load", "messages", "place", "rack", "redo", "save", "scores",
    "skip", "source", "submit", "timer", "undo", "words",
];

// commands whose argument is a path.
const FILE_COMMANDS: &[&str] = &["load", "save", "source"];

#[derive(rustyline_derive::Helper, rustyline_derive::Validator)]
pub struct MyHelper {
    completer: FilenameCompleter,
    hinter: rustyline::hint::HistoryHinter,
    colored_prompt: String,
}

impl Completer for MyHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        match before.split_once(' ') {
            None => Ok((
                0,
                COMMANDS
                    .iter()
                    .filter(|cmd| cmd.starts_with(before))
                    .map(|&cmd| Pair {
                        display: cmd.to_owned(),
                        replacement: format!("{cmd} "),
                    })
                    .collect(),
            )),
            Some((cmd, _)) if FILE_COMMANDS.contains(&cmd) => {
                self.completer.complete(line, pos, ctx)
            }
            Some(_) => Ok((pos, Vec::new())),
        }
    }
}

impl rustyline::hint::Hinter for MyHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl rustyline::highlight::Highlighter for MyHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> std::borrow::Cow<'b, str> {
        if default {
            std::borrow::Cow::Borrowed(&self.colored_prompt)
        } else {
            std::borrow::Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> std::borrow::Cow<'h, str> {
        std::borrow::Cow::Owned("\x1b[1m".to_owned() + hint + "\x1b[m")
    }
}

pub fn new_rl_editor(
    prompt: &str,
) -> rustyline::Result<rustyline::Editor<MyHelper, rustyline::history::DefaultHistory>> {
    let mut rl = rustyline::Editor::new()?;
    rl.set_helper(Some(MyHelper {
        completer: FilenameCompleter::new(),
        hinter: rustyline::hint::HistoryHinter {},
        colored_prompt: format!("\x1b[1;32m{prompt}\x1b[0m"),
    }));
    Ok(rl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    fn helper() -> MyHelper {
        MyHelper {
            completer: FilenameCompleter::new(),
            hinter: rustyline::hint::HistoryHinter {},
            colored_prompt: ">> ".to_owned(),
        }
    }

    #[test]
    fn completes_command_names() {
        let history = DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        let (start, pairs) = helper().complete("s", 1, &ctx).unwrap();
        assert_eq!(start, 0);
        let names: Vec<_> = pairs.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(names, vec!["save", "scores", "skip", "source", "submit"]);
    }

    #[test]
    fn no_completion_for_tile_arguments() {
        let history = DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        let (start, pairs) = helper().complete("place A", 7, &ctx).unwrap();
        assert_eq!(start, 7);
        assert!(pairs.is_empty());
    }
}
