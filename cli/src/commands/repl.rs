//! The `repl` command - interactive REPL.

use cligen::{Cvec, CvType, Session};
use nu_ansi_term::Style;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, Emacs,
    FileBackedHistory, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};

use crate::cli::GlobalOptions;
use crate::common::{CliResult, panic as panic_handler};

use super::eval::{interpret_input, print_result};

const HELP: &str = "\
Statements:
  int8(5) + uint32(10)      typed literals, widened arithmetic
  gw = ipv4addr(10.0.0.1)   assign a variable
  \"via \" + $gw              read a variable
  x += 1                    update in place
Commands:
  :vars    list variables
  :types   list types
  :help    show this help
  :quit    exit";

/// A line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Vars,
    Types,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
    Statement(&'a str),
}

impl<'a> ReplInput<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => ReplInput::Empty,
            ":vars" | ":v" => ReplInput::Vars,
            ":types" | ":t" => ReplInput::Types,
            ":help" | ":h" | ":?" => ReplInput::Help,
            ":quit" | ":q" | ":exit" => ReplInput::Quit,
            cmd if cmd.starts_with(':') => ReplInput::Unknown(cmd),
            statement => ReplInput::Statement(statement),
        }
    }
}

/// Format a variable vector one variable per line, e.g.
/// `\t0 name:x type:uint8 value:5`.
pub fn format_vars(vars: &Cvec) -> String {
    let mut out = String::new();
    for (i, var) in vars.iter().enumerate() {
        out.push_str(&format!(
            "\t{i} name:{} type:{} value:{var}\n",
            var.name().unwrap_or(""),
            var.type2str()
        ));
    }
    out
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let mut words: Vec<String> = [":vars", ":types", ":help", ":quit"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    words.extend(CvType::ALL.iter().map(|kind| kind.as_str().to_string()));

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&[':', '_']);
        completions.insert(words);
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);
    let edit_mode = Box::new(Emacs::new(keybindings));

    let history: Box<dyn reedline::History> = match dirs::config_dir()
        .map(|p| p.join("cligen/history"))
        .and_then(|p| FileBackedHistory::with_file(10000, p).ok())
    {
        Some(h) => Box::new(h),
        None => {
            tracing::warn!("could not open history file, using in-memory history");
            Box::new(FileBackedHistory::default())
        }
    };

    let line_editor = Reedline::create()
        .with_history(history)
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("cgv".into()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Run the REPL command.
pub fn run(global: &GlobalOptions) -> CliResult<()> {
    let mut session = Session::with_options(global.arith);
    let (mut line_editor, prompt) = setup_reedline();

    let style = Style::new().dimmed();
    let hint = ":help for help; Ctrl+D to exit";
    if global.no_color {
        println!("cgv REPL. {hint}");
    } else {
        println!("cgv REPL. {}", style.paint(hint));
    }

    loop {
        let sig = match line_editor.read_line(&prompt) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Reedline error: {e}");
                return Ok(());
            }
        };

        match sig {
            Signal::Success(buffer) => match ReplInput::classify(&buffer) {
                ReplInput::Empty => {}
                ReplInput::Vars => print!("{}", format_vars(session.vars())),
                ReplInput::Types => print!("{}", super::types::table()),
                ReplInput::Help => println!("{HELP}"),
                ReplInput::Quit => return Ok(()),
                ReplInput::Unknown(cmd) => {
                    eprintln!("unknown command `{cmd}`; try :help");
                }
                ReplInput::Statement(statement) => {
                    // Set current expression for panic handler (crash reports)
                    panic_handler::set_current_expression(statement);

                    if let Some(var) = interpret_input(&mut session, statement, None, global.no_color)
                    {
                        print_result(&var, true);
                    }

                    // Clear expression after evaluation (success or handled error)
                    panic_handler::clear_current_expression();
                }
            },
            Signal::CtrlD => {
                println!("\nGoodbye!");
                return Ok(());
            }
            Signal::CtrlC => {
                continue;
            }
        }
    }
}
