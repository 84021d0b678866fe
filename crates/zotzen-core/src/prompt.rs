//! Operator interaction seam
//!
//! The link engine and the credential installer suspend on a single line
//! of operator input. Tests substitute a scripted implementation.

use std::io::{BufRead, Write};

/// One-line operator interaction
pub trait Prompter {
    /// Ask a yes/no question. An empty answer applies the default.
    fn confirm(&self, question: &str, default_yes: bool) -> bool;

    /// Read one line of free-form input.
    fn input(&self, prompt: &str) -> String;
}

/// Prompter backed by stdin/stdout
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, question: &str, default_yes: bool) -> bool {
        let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
        let answer = self.input(&format!("{} {}", question, suffix));
        match answer.trim().to_lowercase().as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            _ => false,
        }
    }

    fn input(&self, prompt: &str) -> String {
        print!("{} ", prompt);
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim_end_matches(&['\r', '\n'][..]).to_string(),
            Err(_) => String::new(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Prompter;
    use std::cell::RefCell;

    /// Scripted prompter for tests: pops answers front-to-back.
    pub struct ScriptedPrompter {
        answers: RefCell<Vec<String>>,
        pub questions: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
                questions: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&self, question: &str, default_yes: bool) -> bool {
            self.questions.borrow_mut().push(question.to_string());
            let mut answers = self.answers.borrow_mut();
            if answers.is_empty() {
                return default_yes;
            }
            let answer = answers.remove(0);
            match answer.trim().to_lowercase().as_str() {
                "" => default_yes,
                "y" | "yes" => true,
                _ => false,
            }
        }

        fn input(&self, prompt: &str) -> String {
            self.questions.borrow_mut().push(prompt.to_string());
            let mut answers = self.answers.borrow_mut();
            if answers.is_empty() {
                String::new()
            } else {
                answers.remove(0)
            }
        }
    }
}
