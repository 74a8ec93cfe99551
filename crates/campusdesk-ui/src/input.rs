use thiserror::Error;

/// One prompt line parsed into a user intent. Multi-field flows (login,
/// register, create, suggest) are follow-up prompts driven by the app; the
/// parser only recognizes the command word for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Quit,
    Refresh,
    Whoami,
    Logout,
    Login,
    Register,
    Create,
    Suggest,
    AcceptSuggestion,
    Comment {
        ticket_id: i64,
        content: String,
    },
    AssignDepartment {
        ticket_id: i64,
        department: String,
    },
    ReassignSupport {
        ticket_id: i64,
        support_id: i64,
    },
    UpdateStatus {
        ticket_id: i64,
        status: String,
    },
    Filter {
        department: Option<String>,
        status: Option<String>,
        sort_by_priority: bool,
    },
    ClearFilter,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}'; type 'help' for the command list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub fn parse_action(line: &str) -> Result<Action, ActionParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ActionParseError::Empty);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "help" => Ok(Action::Help),
        "quit" | "exit" => Ok(Action::Quit),
        "refresh" | "tickets" => Ok(Action::Refresh),
        "whoami" => Ok(Action::Whoami),
        "logout" => Ok(Action::Logout),
        "login" => Ok(Action::Login),
        "register" => Ok(Action::Register),
        "create" => Ok(Action::Create),
        "suggest" => Ok(Action::Suggest),
        "accept" => Ok(Action::AcceptSuggestion),
        "comment" => {
            let (ticket_id, content) =
                id_and_text(rest, "comment <ticket-id> <text>")?;
            Ok(Action::Comment { ticket_id, content })
        }
        "assign" => {
            let (ticket_id, department) =
                id_and_text(rest, "assign <ticket-id> <department name>")?;
            Ok(Action::AssignDepartment {
                ticket_id,
                department,
            })
        }
        "reassign" => {
            let usage = "reassign <ticket-id> <support-staff-id>";
            let (ticket_id, raw_support) = id_and_text(rest, usage)?;
            let support_id = raw_support
                .parse()
                .map_err(|_| ActionParseError::Usage(usage))?;
            Ok(Action::ReassignSupport {
                ticket_id,
                support_id,
            })
        }
        "status" => {
            let (ticket_id, status) =
                id_and_text(rest, "status <ticket-id> <Open|In Progress|Resolved|Closed>")?;
            Ok(Action::UpdateStatus { ticket_id, status })
        }
        "filter" => parse_filter(rest),
        other => Err(ActionParseError::Unknown(other.to_owned())),
    }
}

fn id_and_text(rest: &str, usage: &'static str) -> Result<(i64, String), ActionParseError> {
    let (raw_id, text) = rest
        .split_once(char::is_whitespace)
        .ok_or(ActionParseError::Usage(usage))?;
    let ticket_id = raw_id
        .parse()
        .map_err(|_| ActionParseError::Usage(usage))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ActionParseError::Usage(usage));
    }
    Ok((ticket_id, text.to_owned()))
}

/// `filter dept=<name> status=<name> sort` in any order, or `filter clear`.
/// Values may contain spaces; a value runs until the next `key=` token.
fn parse_filter(rest: &str) -> Result<Action, ActionParseError> {
    const USAGE: &str = "filter [dept=<name>] [status=<name>] [sort] | filter clear";

    if rest == "clear" {
        return Ok(Action::ClearFilter);
    }
    if rest.is_empty() {
        return Err(ActionParseError::Usage(USAGE));
    }

    let mut department: Option<String> = None;
    let mut status: Option<String> = None;
    let mut sort_by_priority = false;
    let mut current: Option<(&'static str, String)> = None;

    for token in rest.split_whitespace() {
        if let Some(value) = token
            .strip_prefix("dept=")
            .or_else(|| token.strip_prefix("department="))
        {
            commit_filter(&mut department, &mut status, current.take());
            current = Some(("dept", value.to_owned()));
        } else if let Some(value) = token.strip_prefix("status=") {
            commit_filter(&mut department, &mut status, current.take());
            current = Some(("status", value.to_owned()));
        } else if token == "sort" {
            commit_filter(&mut department, &mut status, current.take());
            sort_by_priority = true;
        } else if let Some((_, value)) = current.as_mut() {
            // Continuation of a multi-word value.
            value.push(' ');
            value.push_str(token);
        } else {
            return Err(ActionParseError::Usage(USAGE));
        }
    }
    commit_filter(&mut department, &mut status, current.take());

    Ok(Action::Filter {
        department,
        status,
        sort_by_priority,
    })
}

fn commit_filter(
    department: &mut Option<String>,
    status: &mut Option<String>,
    pair: Option<(&'static str, String)>,
) {
    match pair {
        Some(("dept", value)) if !value.is_empty() => *department = Some(value),
        Some(("status", value)) if !value.is_empty() => *status = Some(value),
        _ => {}
    }
}
