use std::io::Write as _;

use campusdesk_ui::{
    help_text, parse_action, print_lines, print_notification, render_view, Action,
    ActionParseError, Notification,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::app::App;
use crate::state::CreateDraft;

type InputLines = Lines<BufReader<Stdin>>;

/// The interactive loop: one prompt line at a time, each action fully
/// sequenced before the next prompt appears.
pub async fn run(app: &mut App) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(app);

    loop {
        let Some(line) = prompt_line(&mut lines, ">").await? else {
            break;
        };

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(ActionParseError::Empty) => continue,
            Err(error) => {
                print_notification(&Notification::error(error.to_string()));
                continue;
            }
        };

        let notification = match action {
            Action::Help => {
                print_lines(&help_text());
                continue;
            }
            Action::Quit => break,
            Action::Whoami => {
                print_notification(&app.handle_whoami());
                continue;
            }
            Action::AcceptSuggestion => {
                print_notification(&app.handle_accept_suggestion());
                continue;
            }
            Action::Login => {
                let Some(email) = prompt_line(&mut lines, "email:").await? else {
                    break;
                };
                let Some(password) = prompt_line(&mut lines, "password:").await? else {
                    break;
                };
                app.handle_login(email.trim(), &password).await
            }
            Action::Register => {
                let Some(email) = prompt_line(&mut lines, "email:").await? else {
                    break;
                };
                let Some(password) = prompt_line(&mut lines, "password:").await? else {
                    break;
                };
                let Some(role) =
                    prompt_line(&mut lines, "role (student/support/department/admin):").await?
                else {
                    break;
                };
                app.handle_register(email.trim(), &password, role.trim())
                    .await
            }
            Action::Create => {
                let draft = app.state().draft().clone();
                let Some(updated) = prompt_draft(&mut lines, draft).await? else {
                    break;
                };
                app.set_draft(updated);
                app.handle_create().await
            }
            Action::Suggest => {
                let draft = app.state().draft().clone();
                let Some(title) =
                    prompt_with_default(&mut lines, "title", draft.title.as_deref()).await?
                else {
                    break;
                };
                let Some(description) =
                    prompt_with_default(&mut lines, "description", draft.description.as_deref())
                        .await?
                else {
                    break;
                };
                match (title, description) {
                    (Some(title), Some(description)) => {
                        app.handle_suggest(&title, &description).await
                    }
                    _ => Notification::error("A suggestion needs both a title and a description."),
                }
            }
            Action::Comment { ticket_id, content } => {
                app.handle_comment(ticket_id, &content).await
            }
            Action::AssignDepartment {
                ticket_id,
                department,
            } => app.handle_assign_department(ticket_id, &department).await,
            Action::ReassignSupport {
                ticket_id,
                support_id,
            } => app.handle_reassign_support(ticket_id, support_id).await,
            Action::UpdateStatus { ticket_id, status } => {
                app.handle_update_status(ticket_id, &status).await
            }
            Action::Filter {
                department,
                status,
                sort_by_priority,
            } => app.handle_filter(department, status, sort_by_priority).await,
            Action::ClearFilter => app.handle_clear_filter().await,
            Action::Refresh => app.handle_refresh().await,
            Action::Logout => app.handle_logout(),
        };

        print_notification(&notification);
        render(app);
    }

    Ok(())
}

fn render(app: &App) {
    println!();
    println!("{}", app.session_line());
    print_lines(&render_view(&app.view()));
}

async fn prompt_line(lines: &mut InputLines, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label} ");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

/// Prompt showing the current draft value; an empty answer keeps it.
/// Outer `None` means EOF, inner `None` means the field is still unset.
async fn prompt_with_default(
    lines: &mut InputLines,
    name: &str,
    current: Option<&str>,
) -> anyhow::Result<Option<Option<String>>> {
    let label = match current {
        Some(current) => format!("{name} [{current}]:"),
        None => format!("{name}:"),
    };
    let Some(answer) = prompt_line(lines, &label).await? else {
        return Ok(None);
    };
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        Ok(Some(current.map(str::to_owned)))
    } else {
        Ok(Some(Some(trimmed.to_owned())))
    }
}

async fn prompt_draft(
    lines: &mut InputLines,
    draft: CreateDraft,
) -> anyhow::Result<Option<CreateDraft>> {
    let Some(title) = prompt_with_default(lines, "title", draft.title.as_deref()).await? else {
        return Ok(None);
    };
    let Some(description) =
        prompt_with_default(lines, "description", draft.description.as_deref()).await?
    else {
        return Ok(None);
    };
    let Some(department) =
        prompt_with_default(lines, "department", draft.department.as_deref()).await?
    else {
        return Ok(None);
    };
    let Some(priority) = prompt_with_default(
        lines,
        "priority (Low/Medium/High)",
        draft.priority.as_deref(),
    )
    .await?
    else {
        return Ok(None);
    };

    Ok(Some(CreateDraft {
        title,
        description,
        department,
        priority,
    }))
}
