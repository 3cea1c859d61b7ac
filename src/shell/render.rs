use std::fmt::Write;

use crate::{
    app::{
        event::EventResult,
        screen::{ContactCreateScreen, ContactListScreen, HomeScreen, Screen, ViewScreen},
    },
    form::form::NotificationKind,
};

/// Plain text rendering of a screen, one block per region
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();

    let nav = screen
        .nav
        .iter()
        .map(|link| match link.active {
            true => format!("[{}]", link.label),
            false => link.label.clone(),
        })
        .collect::<Vec<String>>()
        .join(" | ");

    let _ = writeln!(
        out,
        "{}    ({}, {})",
        nav,
        screen.path,
        screen.language.native_name()
    );
    let _ = writeln!(out, "{}", "-".repeat(60));

    match &screen.view {
        ViewScreen::Home(home) => render_home(&mut out, home),
        ViewScreen::ContactList(list) => render_contact_list(&mut out, list),
        ViewScreen::ContactCreate(form) => render_contact_create(&mut out, form),
    }

    if let Some(alert) = &screen.alert {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "!! {}: {}  [dismiss = {}]",
            alert.title, alert.message, alert.dismiss_label
        );
    }

    out
}

fn render_home(out: &mut String, home: &HomeScreen) {
    let _ = writeln!(out, "{}", home.welcome);
    let _ = writeln!(out, "{}", home.greeting);
    let _ = writeln!(out);

    for detail in &home.details {
        let _ = writeln!(out, "{:<12} {}", format!("{}:", detail.label), detail.value);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Avatar: {}", abbreviate(&home.profile_image, 72));

    if let Some(uploading) = &home.uploading {
        let _ = writeln!(out, "{}", uploading);
    }

    let _ = writeln!(
        out,
        "[{}]  [{}]",
        home.upload_label, home.location_label
    );

    if home.location_panel_open {
        let _ = writeln!(out, "  > [{}]", home.locate_label);
    }

    if let Some(location) = &home.location {
        let _ = writeln!(out, "{}", location);
    }
}

fn render_contact_list(out: &mut String, list: &ContactListScreen) {
    let _ = writeln!(out, "{}", list.title);
    let _ = writeln!(
        out,
        "Search: {}",
        match list.search_term.is_empty() {
            true => &list.search_placeholder,
            false => &list.search_term,
        }
    );

    if let Some(status) = &list.search_status {
        let _ = writeln!(out, "{}", status);
    }

    let _ = writeln!(out);

    if let Some(empty_message) = &list.empty_message {
        let _ = writeln!(out, "{}", empty_message);
        return;
    }

    if let [number, first_name, last_name, age, action] = list.columns.as_slice() {
        let _ = writeln!(
            out,
            "{:>4}  {:<16} {:<16} {:>4}  {} ",
            number, first_name, last_name, age, action
        );
    }

    for row in &list.rows {
        let _ = writeln!(
            out,
            "{:>4}  {:<16} {:<16} {:>4}  id={}",
            row.number, row.first_name, row.last_name, row.age, row.id
        );
    }

    let _ = writeln!(out);

    let pages = list
        .pages
        .iter()
        .map(|page| match page.active {
            true => format!("[{}]", page.label),
            false => page.label.clone(),
        })
        .collect::<Vec<String>>()
        .join(" ");

    let _ = writeln!(
        out,
        "{} {} {}",
        match list.can_go_previous {
            true => "<",
            false => " ",
        },
        pages,
        match list.can_go_next {
            true => ">",
            false => " ",
        }
    );

    if let Some(summary) = &list.page_summary {
        let _ = writeln!(out, "{}", summary);
    }
}

fn render_contact_create(out: &mut String, form: &ContactCreateScreen) {
    let _ = writeln!(out, "{}", form.title);
    let _ = writeln!(out);

    for field in &form.fields {
        let value = match field.value.is_empty() {
            true => format!("({})", field.placeholder),
            false => field.value.clone(),
        };

        let _ = writeln!(out, "{:<12} {}", format!("{}:", field.label), value);

        if let Some(error) = &field.error {
            let _ = writeln!(out, "{:<12} ! {}", "", error);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "[{}]  [{}]", form.submit_label, form.cancel_label);

    if let Some(notification) = &form.notification {
        let marker = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✘",
        };

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}: {}  [ok = {}]",
            marker, notification.title, notification.message, notification.dismiss_label
        );
    }
}

pub fn render_event_result(result: &EventResult) -> Option<String> {
    match result {
        EventResult::Applied => None,
        EventResult::Ignored(reason) => Some(format!("(ignored) {}", reason)),
        EventResult::Blocked(alert) => Some(format!("(blocked) dismiss the alert first: {}", alert)),
        // The alert itself is part of the rendered screen
        EventResult::Alert(_) => None,
    }
}

/// Data URLs run to megabytes
fn abbreviate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    let head: String = value.chars().take(max_chars).collect();
    format!("{}... ({} chars)", head, value.chars().count())
}
