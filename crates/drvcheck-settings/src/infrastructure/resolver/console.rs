//! Console resolver: asks the operator on a terminal.
//!
//! ```text
//! Do you want to search for client updates? [y/n]: y
//!
//! Choose driver type
//!   1) Game Ready Driver (GRD)
//!   2) Studio Driver (SD)
//! Select [1-2]: 2
//!
//! Choose a download location for driver packages [/tmp]:
//! ```
//!
//! Invalid answers are asked again.  End of input picks the safe answer:
//! "no" for yes/no questions, the first option for choices, and the
//! suggestion (or an empty string) for text.
//!
//! With [`ConsoleResolver::pause_on_wipe`] the wipe notice waits for Enter
//! before the caller gets to exit.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use tracing::warn;

use crate::application::resolver::{
    ChoicePrompt, ConfirmPrompt, InteractiveResolver, Notice, TextPrompt,
};

/// [`InteractiveResolver`] that reads answers from `input` and writes
/// prompts to `output`.
pub struct ConsoleResolver<R, W> {
    input: R,
    output: W,
    pause_on_wipe: bool,
}

impl ConsoleResolver<StdinLock<'static>, Stderr> {
    /// Resolver reading stdin and prompting on stderr, leaving stdout to the
    /// command's own output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsoleResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pause_on_wipe: false,
        }
    }

    /// Waits for the operator to press Enter after a
    /// [`Notice::ConfigWiped`].
    pub fn pause_on_wipe(mut self) -> Self {
        self.pause_on_wipe = true;
        self
    }

    /// Consumes the resolver, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `prompt` and reads one trimmed line.  `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{prompt}").and_then(|()| self.output.flush()) {
            warn!(error = %e, "failed to write prompt");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "failed to read answer");
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            warn!(error = %e, "failed to write to console");
        }
    }
}

impl<R: BufRead, W: Write> InteractiveResolver for ConsoleResolver<R, W> {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        let question = format!("{} [y/n]: ", prompt.question);
        loop {
            let Some(answer) = self.ask(&question) else {
                return false;
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => self.say("Please answer 'y' or 'n'."),
            }
        }
    }

    fn choose(&mut self, prompt: &ChoicePrompt) -> String {
        let Some(first) = prompt.options.first() else {
            warn!(key = %prompt.key, "choice prompt without options");
            return String::new();
        };
        let fallback = first.tag.clone();

        self.say("");
        self.say(prompt.heading);
        if !prompt.text.is_empty() {
            self.say(prompt.text);
        }
        for (index, option) in prompt.options.iter().enumerate() {
            self.say(&format!("  {}) {}", index + 1, option.label));
        }

        let count = prompt.options.len();
        let question = format!("Select [1-{count}]: ");
        loop {
            let Some(answer) = self.ask(&question) else {
                return fallback;
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return prompt.options[n - 1].tag.clone(),
                _ => self.say(&format!("Please enter a number between 1 and {count}.")),
            }
        }
    }

    fn free_text(&mut self, prompt: &TextPrompt) -> String {
        let question = match &prompt.suggestion {
            Some(suggestion) => format!("{} [{suggestion}]: ", prompt.heading),
            None => format!("{}: ", prompt.heading),
        };
        match self.ask(&question) {
            Some(answer) if !answer.is_empty() => answer,
            _ => prompt.suggestion.clone().unwrap_or_default(),
        }
    }

    fn notify(&mut self, notice: &Notice) {
        self.say(&notice.to_string());
        if self.pause_on_wipe && matches!(notice, Notice::ConfigWiped { .. }) {
            self.ask("Press Enter to exit . . .");
        }
    }
}
