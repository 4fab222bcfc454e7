//! The `studyplan interactive` command.
//!
//! A numbered menu over any reader/writer pair. Numeric prompts re-ask until
//! the answer parses and falls in range; a failed action prints the error
//! and returns to the menu. End of input ends the session.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use studyplan_core::{AdaptiveParams, StudyPlanner};

use super::subjects::render_table;
use super::{demo_planner, Session};

const MENU: &str = "\
Menu:
1) Add Subject
2) Remove Subject
3) List Subjects
4) Set total daily hours
5) Generate Schedule
6) Show Current Schedule
7) Record Performance for Subject
8) Adaptive Adjustment
9) Save to file
10) Load from file
0) Exit
Enter choice: ";

pub fn execute(session: &Session) -> Result<()> {
    let mut planner = if session.data_file.exists() {
        session.load_planner()?
    } else {
        demo_planner(session.daily_hours)?
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &mut planner,
        &session.config.adaptive,
        &session.data_file,
        stdin.lock(),
        stdout.lock(),
    )
}

/// Drive the menu until the user exits or input runs out.
pub fn run_session<R: BufRead, W: Write>(
    planner: &mut StudyPlanner,
    params: &AdaptiveParams,
    default_file: &Path,
    input: R,
    output: W,
) -> Result<()> {
    let mut prompt = Prompter { input, output };
    writeln!(prompt.output, "\n=== STUDY PLANNER ===")?;

    loop {
        write!(prompt.output, "\n{MENU}")?;
        prompt.output.flush()?;

        let Some(line) = prompt.read_line()? else {
            break;
        };
        let Ok(choice) = line.trim().parse::<u32>() else {
            continue;
        };
        if choice == 0 {
            break;
        }

        match run_choice(choice, planner, params, default_file, &mut prompt) {
            Ok(Step::Continue) => {}
            Ok(Step::Eof) => break,
            Err(e) => writeln!(prompt.output, "Error: {e:#}")?,
        }
    }

    writeln!(prompt.output, "Goodbye!")?;
    Ok(())
}

enum Step {
    Continue,
    Eof,
}

/// Unwrap a prompt answer, ending the action on end of input.
macro_rules! answer {
    ($e:expr) => {
        match $e? {
            Some(v) => v,
            None => return Ok(Step::Eof),
        }
    };
}

fn run_choice<R: BufRead, W: Write>(
    choice: u32,
    planner: &mut StudyPlanner,
    params: &AdaptiveParams,
    default_file: &Path,
    prompt: &mut Prompter<R, W>,
) -> Result<Step> {
    match choice {
        1 => {
            let name = answer!(prompt.required("Subject name: "));
            let difficulty = answer!(prompt.int_in("Difficulty (1-10): ", 1, 10));
            let importance = answer!(prompt.int_in("Importance (1-10): ", 1, 10));
            let perf = answer!(prompt.float_in("Initial performance (0-100): ", 0.0, 100.0));
            planner.add_subject(&name, difficulty, importance, perf)?;
        }
        2 => {
            let name = answer!(prompt.required("Subject name to remove: "));
            planner.remove_subject(&name);
        }
        3 => writeln!(prompt.output, "{}", render_table(planner))?,
        4 => {
            let hours = answer!(prompt.float_in("Enter total study hours per day: ", 0.0, 24.0));
            planner.set_total_daily_hours(hours)?;
        }
        5 => {
            let schedule = planner.generate_schedule();
            write!(prompt.output, "{schedule}")?;
        }
        6 => write!(prompt.output, "{}", planner.current_schedule())?,
        7 => {
            let name = answer!(prompt.required("Subject name: "));
            let score = answer!(prompt.float_in("Enter score (0-100): ", 0.0, 100.0));
            planner.record_performance(&name, score)?;
        }
        8 => {
            planner.adaptive_adjust(params);
            write!(prompt.output, "{}", planner.current_schedule())?;
        }
        9 => {
            let path = answer!(prompt.path_or(
                &format!("Save filename [{}]: ", default_file.display()),
                default_file,
            ));
            planner.save_to_file(&path)?;
            writeln!(prompt.output, "Saved to {}", path.display())?;
        }
        10 => {
            let path = answer!(prompt.path_or(
                &format!("Load filename [{}]: ", default_file.display()),
                default_file,
            ));
            planner.load_from_file(&path)?;
            writeln!(
                prompt.output,
                "Loaded {} subject(s) from {}",
                planner.len(),
                path.display()
            )?;
        }
        other => writeln!(prompt.output, "Unknown choice: {other}")?,
    }
    Ok(Step::Continue)
}

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Next input line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask until a non-blank answer is given.
    fn required(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            match self.ask(prompt)? {
                Some(answer) if answer.trim().is_empty() => continue,
                Some(answer) => return Ok(Some(answer.trim().to_string())),
                None => return Ok(None),
            }
        }
    }

    fn int_in(&mut self, prompt: &str, min: i64, max: i64) -> io::Result<Option<i64>> {
        self.parsed_in(prompt, min, max)
    }

    fn float_in(&mut self, prompt: &str, min: f64, max: f64) -> io::Result<Option<f64>> {
        self.parsed_in(prompt, min, max)
    }

    fn parsed_in<T>(&mut self, prompt: &str, min: T, max: T) -> io::Result<Option<T>>
    where
        T: std::str::FromStr + PartialOrd,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.trim().parse::<T>() {
                Ok(v) if v >= min && v <= max => return Ok(Some(v)),
                _ => continue,
            }
        }
    }

    /// Ask for a path; a blank answer picks `default`.
    fn path_or(&mut self, prompt: &str, default: &Path) -> io::Result<Option<PathBuf>> {
        Ok(self.ask(prompt)?.map(|answer| {
            let answer = answer.trim();
            if answer.is_empty() {
                default.to_path_buf()
            } else {
                PathBuf::from(answer)
            }
        }))
    }
}
