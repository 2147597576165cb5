//! `sfr fill` - interactive fill-in
//!
//! Walks the rendered form one enabled input at a time and re-renders after
//! every commit, so inputs revealed by rules or added array rows are asked
//! for as well. The resulting data is printed as JSON (or YAML).

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Password, Select};
use miette::{bail, IntoDiagnostic, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::helpers::FormArgs;
use crate::cli::output::{to_structured, write_output};
use crate::core::config::Config;
use crate::core::form::{Form, FormEvent};
use crate::renderers::controls::RawInput;
use crate::renderers::widget::{Action, Binding, InputType, Widget};

#[derive(clap::Args, Debug)]
pub struct FillArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Write the data to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// An enabled input together with the field around it
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Prompt {
    pub binding: Binding,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub error: Option<String>,
    pub input: Widget,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    Ask(Prompt),
    OfferItem { path: String, value: Value },
    Done,
}

pub fn run(args: FillArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let mut form = args.form.load(config)?;
    if !console::user_attended_stderr() {
        bail!("sfr fill needs an interactive terminal");
    }

    let theme = ColorfulTheme::default();
    let mut asked = HashSet::new();
    let mut declined = HashSet::new();
    loop {
        match next_step(&form, &asked, &declined) {
            Step::Ask(prompt) => {
                asked.insert(prompt.binding.path.clone());
                if let Some(raw) = ask(&prompt, &theme)? {
                    let binding = prompt.binding.clone();
                    if !form.apply(FormEvent::Input { binding, raw }) {
                        debug!(path = %prompt.binding.path, "answer not applicable");
                    }
                }
            }
            Step::OfferItem { path, value } => {
                let add = Confirm::with_theme(&theme)
                    .with_prompt(format!("Add an item to {}?", path))
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                if add {
                    form.apply(FormEvent::Action(Action::AddItem { path, value }));
                } else {
                    declined.insert(path);
                }
            }
            Step::Done => break,
        }
    }

    if !global.quiet && !form.errors().is_empty() {
        eprintln!(
            "{} The data still has {} validation error(s)",
            style("!").yellow(),
            form.errors().len()
        );
    }

    let format = match global.format.resolve(config.default_format.as_deref()) {
        OutputFormat::Yaml => OutputFormat::Yaml,
        _ => OutputFormat::Json,
    };
    write_output(&to_structured(form.data(), format)?, args.output.as_ref(), global.quiet)
}

/// What to do next: the first input not yet asked, then any enabled "Add"
pub(crate) fn next_step(form: &Form, asked: &HashSet<String>, declined: &HashSet<String>) -> Step {
    let Some(root) = form.render() else {
        return Step::Done;
    };
    if let Some(prompt) = prompts(&root)
        .into_iter()
        .find(|p| !asked.contains(&p.binding.path))
    {
        return Step::Ask(prompt);
    }
    for button in root.buttons() {
        if let Widget::Button {
            action: Action::AddItem { path, value },
            disabled: false,
            ..
        } = button
        {
            if !declined.contains(path) {
                return Step::OfferItem {
                    path: path.clone(),
                    value: value.clone(),
                };
            }
        }
    }
    Step::Done
}

/// Enabled inputs in display order
pub(crate) fn prompts(root: &Widget) -> Vec<Prompt> {
    let mut found = Vec::new();
    root.walk(&mut |widget| {
        let Widget::FormField {
            label,
            description,
            required,
            error,
            child,
        } = widget
        else {
            return;
        };
        if let Some(binding) = child.binding().filter(|_| !is_disabled(child)) {
            found.push(Prompt {
                binding: binding.clone(),
                label: label.clone(),
                description: description.clone(),
                required: *required,
                error: error.clone(),
                input: child.as_ref().clone(),
            });
        }
    });
    found
}

fn is_disabled(widget: &Widget) -> bool {
    match widget {
        Widget::Input { disabled, .. }
        | Widget::Textarea { disabled, .. }
        | Widget::Switch { disabled, .. }
        | Widget::SelectMenu { disabled, .. } => *disabled,
        _ => true,
    }
}

/// Ask for one value; `None` keeps the current one
fn ask(prompt: &Prompt, theme: &ColorfulTheme) -> Result<Option<RawInput>> {
    let caption = if prompt.required {
        format!("{}*", prompt.label)
    } else {
        prompt.label.clone()
    };
    if let Some(description) = &prompt.description {
        eprintln!("{}", style(description).dim());
    }
    if let Some(error) = &prompt.error {
        eprintln!("{} {}", style("✗").red(), style(error).red());
    }

    let raw = match &prompt.input {
        Widget::Switch { checked, .. } => {
            let answer = Confirm::with_theme(theme)
                .with_prompt(caption)
                .default(*checked)
                .interact()
                .into_diagnostic()?;
            RawInput::Bool(answer)
        }
        Widget::SelectMenu {
            multiple: false,
            options,
            selected,
            placeholder,
            ..
        } => {
            let mut items = vec![placeholder.clone()];
            items.extend(options.iter().map(|o| o.label.clone()));
            let current = selected
                .first()
                .and_then(|v| options.iter().position(|o| &o.value == v))
                .map_or(0, |i| i + 1);
            let choice = Select::with_theme(theme)
                .with_prompt(caption)
                .items(&items)
                .default(current)
                .interact()
                .into_diagnostic()?;
            RawInput::Selection(choice.checked_sub(1).and_then(|i| options.get(i)).map(|o| o.value.clone()))
        }
        Widget::SelectMenu {
            multiple: true,
            options,
            selected,
            ..
        } => {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            let defaults: Vec<bool> = options.iter().map(|o| selected.contains(&o.value)).collect();
            let chosen = MultiSelect::with_theme(theme)
                .with_prompt(caption)
                .items(&labels)
                .defaults(&defaults)
                .interact()
                .into_diagnostic()?;
            RawInput::Selections(Value::Array(
                chosen
                    .into_iter()
                    .filter_map(|i| options.get(i).map(|o| o.value.clone()))
                    .collect(),
            ))
        }
        Widget::Input {
            input_type: InputType::Password,
            ..
        } => {
            let text = Password::with_theme(theme)
                .with_prompt(format!("{} (empty keeps the current value)", caption))
                .allow_empty_password(true)
                .interact()
                .into_diagnostic()?;
            if text.is_empty() {
                return Ok(None);
            }
            RawInput::Text(text)
        }
        Widget::Input { value, .. } | Widget::Textarea { value, .. } => {
            let text: String = Input::with_theme(theme)
                .with_prompt(caption)
                .with_initial_text(value.clone())
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            text_input(text)
        }
        _ => return Ok(None),
    };
    Ok(Some(raw))
}

/// Empty text clears the value instead of storing `""`
fn text_input(text: String) -> RawInput {
    if text.is_empty() {
        RawInput::Clear
    } else {
        RawInput::Text(text)
    }
}
