use campusdesk_core::{role_label, TicketCard, ViewModel};
use crossterm::style::Stylize;

use crate::notify::{Notification, NotificationLevel};

/// Format the view model as plain terminal lines. All visibility decisions
/// were made by the projection; this only arranges text.
pub fn render_view(view: &ViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let Some(section) = view.section else {
        return lines;
    };
    lines.push(format!("== {} ==", section.title()));

    if let Some(notice) = &view.empty_notice {
        lines.push(notice.clone());
        return lines;
    }

    for card in &view.cards {
        render_card(&mut lines, card);
    }

    if !view.reassign_options.is_empty() {
        let staff: Vec<String> = view
            .reassign_options
            .iter()
            .map(|entry| format!("#{} {}", entry.id, entry.email))
            .collect();
        lines.push(format!("support staff: {}", staff.join(", ")));
    }

    lines
}

fn render_card(lines: &mut Vec<String>, card: &TicketCard) {
    let ticket = &card.ticket;
    lines.push(format!(
        "#{} {} [{} | {}]",
        ticket.id,
        ticket.title,
        ticket.status.as_str(),
        ticket.priority.as_str()
    ));
    lines.push(format!("    opened {}", ticket.created_at));
    if let Some(creator_info) = &card.creator_info {
        lines.push(format!("    reporter: {creator_info}"));
    }
    lines.push(format!("    {}", ticket.description));

    if !ticket.comments.is_empty() {
        lines.push(format!("    comments ({}):", ticket.comments.len()));
        for comment in &ticket.comments {
            lines.push(format!(
                "      - [{}] user {}: {}",
                comment.created_at, comment.user_id, comment.content
            ));
        }
    }

    let mut actions = vec!["comment"];
    if card.controls.status_update {
        actions.push("status");
    }
    if card.controls.reassign_support {
        actions.push("reassign");
    }
    if card.controls.assign_department {
        actions.push("assign");
    }
    lines.push(format!("    actions: {}", actions.join(" | ")));
}

pub fn render_session_line(identity: Option<&str>, role_name: Option<&str>) -> String {
    match (identity, role_name) {
        (Some(identity), Some(role_name)) => {
            format!("signed in as {} ({})", identity, role_label(role_name))
        }
        (Some(identity), None) => format!("signed in as {identity}"),
        _ => "not signed in".to_owned(),
    }
}

pub fn help_text() -> Vec<String> {
    [
        "commands:",
        "  login / register / logout / whoami",
        "  refresh                 reload the ticket list",
        "  create                  draft and submit a new ticket",
        "  suggest                 ask for a department/priority recommendation",
        "  accept                  copy the last suggestion into the draft",
        "  comment <id> <text>     comment on a ticket",
        "  status <id> <state>     update a ticket's status",
        "  reassign <id> <staff>   reassign a ticket to a support member",
        "  assign <id> <dept>      assign a ticket to a department",
        "  filter dept=X status=Y sort | filter clear",
        "  quit",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub fn print_notification(notification: &Notification) {
    match notification.level {
        NotificationLevel::Success => println!("{}", notification.text.as_str().green()),
        NotificationLevel::Error => println!("{}", notification.text.as_str().red()),
        NotificationLevel::Info => println!("{}", notification.text.as_str().dark_grey()),
    }
}
