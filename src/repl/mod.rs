//! Interactive console for exploring the completion engine.
//!
//! The console is the editor-adapter role played in a terminal: reedline
//! supplies the line editor, the engine supplies completions (Tab),
//! highlighting, hover docs, and chain-state inspection. Nothing here
//! executes queries; entering a chain prints what the engine understood
//! about it.

pub mod completer;
pub mod highlighter;
pub mod prompt;

pub use completer::BuilderCompleter;
pub use highlighter::DslHighlighter;
pub use prompt::QueryshPrompt;

use std::sync::Arc;

use nu_ansi_term::Color;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers,
    MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use tracing::info;

use crate::config::Config;
use crate::engine::CompletionEngine;
use crate::error::{QueryshError, Result};
use crate::state::resolve_context;

const COMPLETION_MENU: &str = "completion_menu";

/// The interactive console engine.
pub struct ConsoleEngine {
    editor: Reedline,
    prompt: QueryshPrompt,
    engine: Arc<CompletionEngine>,
    color: bool,
}

impl ConsoleEngine {
    /// Build the console: line editor, completion menu, highlighter, and
    /// history per the configuration.
    pub fn new(engine: Arc<CompletionEngine>, config: &Config, schema_name: String) -> Result<Self> {
        let completer = BuilderCompleter::new(engine.clone(), config.suggestions.clone());

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let mut editor = Reedline::create()
            .with_completer(Box::new(completer))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_highlighter(Box::new(DslHighlighter::new(
                engine.clone(),
                config.display.syntax_highlighting,
            )));

        if config.history.persist {
            if let Some(parent) = config.history.file_path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let history =
                FileBackedHistory::with_file(config.history.max_size, config.history.file_path.clone())
                    .map_err(|e| QueryshError::Generic(format!("History setup failed: {e}")))?;
            editor = editor.with_history(Box::new(history));
        }

        Ok(Self {
            editor,
            prompt: QueryshPrompt::new(schema_name),
            engine,
            color: config.display.color_output,
        })
    }

    /// Run the read loop until exit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.editor.read_line(&self.prompt) {
                Ok(Signal::Success(line)) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    if input == "exit" || input == "quit" {
                        break;
                    }
                    self.handle_input(input);
                }
                Ok(Signal::CtrlC) => continue,
                Ok(Signal::CtrlD) => break,
                Err(e) => {
                    return Err(QueryshError::Generic(format!("Read error: {e}")));
                }
            }
        }

        info!("console exiting");
        Ok(())
    }

    fn handle_input(&self, input: &str) {
        match input {
            "help" => self.print_help(),
            "schema" => self.print_schema(),
            _ => {
                if let Some(word) = input.strip_prefix("hover ") {
                    self.print_hover(word.trim());
                } else {
                    self.print_chain_state(input);
                }
            }
        }
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  help            Show this help");
        println!("  schema          List tables and columns");
        println!("  hover <word>    Documentation for a table, column, method, or helper");
        println!("  exit, quit      Leave the console");
        println!();
        println!("Anything else is treated as a builder chain; Tab completes it and");
        println!("entering it prints what the engine understood.");
    }

    fn print_schema(&self) {
        for table in &self.engine.schema().tables {
            println!("{}", self.paint(Color::Magenta, &table.name));
            for col in &table.columns {
                let mut flags = String::new();
                if col.primary_key {
                    flags.push_str(" pk");
                }
                if col.nullable {
                    flags.push_str(" nullable");
                }
                println!("  {}: {}{}", col.name, col.column_type, flags);
            }
        }
    }

    fn print_hover(&self, word: &str) {
        match self.engine.hover(word) {
            Some(doc) => {
                for block in doc.contents {
                    println!("{block}");
                }
            }
            None => println!("No documentation for '{word}'"),
        }
    }

    /// Show what the engine understood about a chain: stage, bound tables,
    /// and any diagnostics.
    fn print_chain_state(&self, input: &str) {
        let ctx = resolve_context(input, input.chars().count());

        println!("stage:  {:?}", ctx.state.kind);
        if !ctx.state.tables.is_empty() {
            println!("tables: {}", ctx.state.tables.join(", "));
        }
        if !ctx.state.columns.is_empty() {
            println!("columns: {}", ctx.state.columns.join(", "));
        }
        if let Some(method) = &ctx.state.method {
            println!("method: {method}");
        }
        if ctx.state.incomplete {
            println!("{}", self.paint(Color::Yellow, "input is incomplete"));
        }

        let result = crate::parser::parse(input);
        for diag in &result.errors {
            println!(
                "{} {} at {}:{}",
                self.paint(Color::Red, "syntax:"),
                diag.message,
                diag.line,
                diag.column
            );
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.color {
            color.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}
