use crate::app::{background, RuntimeContext};
use crate::ui::App;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle key events on the inquiry form
pub(super) fn handle_form_input(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) -> Result<()> {
    let editable = !app.controller.is_loading();
    let newline_modifier = key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => {
            if app.controller.is_loading() || app.controller.error().is_some() {
                app.reset();
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Enter if newline_modifier => {
            if editable {
                app.form.push('\n');
            }
        }
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if editable {
                app.form.push('\n');
            }
        }
        KeyCode::Enter => submit_inquiry(app, ctx),
        KeyCode::F(n @ 1..=3) => app.select_sample(usize::from(n) - 1),
        KeyCode::Backspace if editable => app.form.pop(),
        KeyCode::Char(c) if editable && !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.push(c)
        }
        _ => {}
    }
    Ok(())
}

pub(super) fn handle_paste(app: &mut App, text: &str) {
    if !app.controller.is_loading() {
        app.form.push_str(text);
    }
}

/// Submit the draft and run the request in the background
fn submit_inquiry(app: &mut App, ctx: &RuntimeContext) {
    let Some(pending) = app.submit() else {
        return;
    };
    background::spawn_generation(ctx.generator.clone(), pending, ctx.tx.clone());
}
