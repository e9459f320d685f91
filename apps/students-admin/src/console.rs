//! Line-oriented front end for the record table.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use student_records::{
    domain::{edit::Field, page::PageSize},
    model::StudentId,
    view::{render_text, HoverTooltip, TableView},
    RecordTable,
};

pub const HELP: &str = "\
commands:
  show                    print the current page
  reload                  fetch all records again
  add                     create a blank record and edit it
  edit <id>               open (or close) a row for editing
  set <field> <value>     change a field of the open row
  save                    push the open row to the store
  delete <id>             delete a record
  page <n>                show page n (1-based)
  size <n>                rows per page: 5, 10, 25 or 100
  hover <x> <y>           move the pointer over the table
  out                     move the pointer away
  help                    this text
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Reload,
    Add,
    Edit(StudentId),
    Set(Field, String),
    Save,
    Delete(StudentId),
    Page(usize),
    Size(PageSize),
    Hover(i32, i32),
    Out,
    Help,
    Quit,
}

fn arg<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(rest)
}

fn student_id(rest: &str, usage: &str) -> Result<StudentId> {
    let raw = arg(rest, usage)?;
    raw.parse()
        .with_context(|| format!("invalid student id '{raw}'"))
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "show" | "ls" => Self::Show,
            "reload" => Self::Reload,
            "add" => Self::Add,
            "edit" => Self::Edit(student_id(rest, "edit <id>")?),
            "set" => {
                let (field, value) = arg(rest, "set <field> <value>")?
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest.trim(), ""));
                Self::Set(field.parse()?, value.trim().to_string())
            }
            "save" => Self::Save,
            "delete" | "rm" => Self::Delete(student_id(rest, "delete <id>")?),
            "page" => {
                let raw = arg(rest, "page <n>")?;
                let n: usize = raw
                    .parse()
                    .with_context(|| format!("invalid page '{raw}'"))?;
                if n == 0 {
                    bail!("pages are numbered from 1");
                }
                Self::Page(n - 1)
            }
            "size" => {
                let raw = arg(rest, "size <n>")?;
                let n: usize = raw
                    .parse()
                    .with_context(|| format!("invalid page size '{raw}'"))?;
                Self::Size(PageSize::try_from(n)?)
            }
            "hover" => {
                let mut coords = arg(rest, "hover <x> <y>")?.split_whitespace();
                let mut next = || -> Result<i32> {
                    let raw = coords.next().ok_or_else(|| anyhow!("usage: hover <x> <y>"))?;
                    raw.parse()
                        .with_context(|| format!("invalid coordinate '{raw}'"))
                };
                Self::Hover(next()?, next()?)
            }
            "out" => Self::Out,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(Some(cmd))
    }
}

/// Console session: one table controller plus the pointer hint.
pub struct Console {
    table: RecordTable,
    tooltip: HoverTooltip,
}

impl Console {
    pub fn new(table: RecordTable) -> Self {
        Self {
            table,
            tooltip: HoverTooltip::default(),
        }
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// Initial fetch; a failure leaves the table empty.
    pub async fn load(&mut self) -> Result<()> {
        self.table.load().await?;
        Ok(())
    }

    pub fn render(&self) -> String {
        let view = TableView::build(&self.table);
        let tip = self.tooltip.visible(self.table.edit_state());
        render_text(&view, tip.as_ref())
    }

    /// Apply one command and return what to print. `None` means quit.
    pub async fn apply(&mut self, cmd: Command) -> Result<Option<String>> {
        match cmd {
            Command::Show => {}
            Command::Reload => self.table.load().await?,
            Command::Add => {
                let id = self.table.add().await?;
                tracing::debug!(student_id = %id, "row added from console");
            }
            Command::Edit(id) => {
                let on_page = self.table.visible_rows().iter().any(|r| r.id == Some(id));
                if !on_page {
                    bail!("student {id} is not on this page");
                }
                self.table.toggle_edit(id);
            }
            Command::Set(field, value) => {
                if !self.table.change_field(field, value) {
                    bail!("no row is being edited (use 'edit <id>' first)");
                }
            }
            Command::Save => self.table.save().await?,
            Command::Delete(id) => self.table.delete(id).await?,
            Command::Page(page) => self.table.change_page(page),
            Command::Size(size) => self.table.change_page_size(size),
            Command::Hover(x, y) => self.tooltip.pointer_over(x, y),
            Command::Out => self.tooltip.pointer_out(),
            Command::Help => return Ok(Some(HELP.to_string())),
            Command::Quit => return Ok(None),
        }
        Ok(Some(self.render()))
    }

    /// Run commands until `quit` or end of input. Failures are printed and
    /// the session continues.
    pub async fn run_lines<I>(&mut self, lines: I, out: &mut impl Write) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        for line in lines {
            let cmd = match Command::parse(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "error: {e:#}")?;
                    continue;
                }
            };
            match self.apply(cmd).await {
                Ok(Some(text)) => writeln!(out, "{text}")?,
                Ok(None) => break,
                Err(e) => writeln!(out, "error: {e:#}")?,
            }
        }
        Ok(())
    }

    /// Interactive loop on stdin/stdout.
    pub async fn run_stdin(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", self.render())?;
        write!(stdout, "> ")?;
        stdout.flush()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("failed to read stdin")?;
            let quit = matches!(Command::parse(&line), Ok(Some(Command::Quit)));
            self.run_lines([line], &mut stdout).await?;
            if quit {
                break;
            }
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        Ok(())
    }
}
