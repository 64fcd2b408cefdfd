//! Service surface: status codes and a line-oriented JSON request adapter.
//!
//! Each request is one JSON object per line, tagged by `op`:
//!
//! ```text
//! {"op":"set_light","role":"battery","state":{"color":4294901760}}
//! {"op":"get_supported_roles"}
//! {"op":"snapshot"}
//! ```
//!
//! Each is answered by exactly one JSON line. Malformed requests get an
//! `error` response and the loop keeps going.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::controller::{LightController, Snapshot};
use crate::error::{LightError, Result};
use crate::state::{LightState, Role};

/// Outcome of a `set_light` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    LightNotSupported,
}

impl Status {
    /// Status for a `set_light` outcome. Errors other than an unsupported
    /// role have no status code and are passed through.
    pub fn from_result(result: Result<()>) -> Result<Self> {
        match result {
            Ok(()) => Ok(Status::Success),
            Err(LightError::RoleNotSupported(_)) => Ok(Status::LightNotSupported),
            Err(e) => Err(e),
        }
    }
}

/// Apply a light state and report the outcome as a status code.
pub fn set_light<A: Attribute>(
    controller: &LightController<A>,
    role: Role,
    state: LightState,
) -> Result<Status> {
    Status::from_result(controller.set_light(role, state))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    SetLight { role: Role, state: LightState },
    GetSupportedRoles,
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Status(Status),
    Roles(Vec<Role>),
    Snapshot(Snapshot),
    Error(String),
}

/// Execute one request.
pub fn handle<A: Attribute>(controller: &LightController<A>, request: Request) -> Response {
    match request {
        Request::SetLight { role, state } => match set_light(controller, role, state) {
            Ok(status) => Response::Status(status),
            Err(e) => Response::Error(e.to_string()),
        },
        Request::GetSupportedRoles => {
            let mut roles = Vec::new();
            controller.get_supported_roles(|r| roles.extend_from_slice(r));
            Response::Roles(roles)
        }
        Request::Snapshot => Response::Snapshot(controller.snapshot()),
    }
}

/// Decode and execute one request line. Blank lines yield `None`.
pub fn handle_line<A: Attribute>(controller: &LightController<A>, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(controller, request),
        Err(e) => {
            log::warn!("bad request {line:?}: {e}");
            Response::Error(LightError::from(e).to_string())
        }
    };
    Some(response)
}

/// Decode one raw request line. Bytes that are not UTF-8 get an error
/// response like any other malformed request.
fn handle_bytes<A: Attribute>(controller: &LightController<A>, line: &[u8]) -> Option<Response> {
    match std::str::from_utf8(line) {
        Ok(text) => handle_line(controller, text),
        Err(e) => {
            log::warn!("bad request: {e}");
            let err = LightError::Protocol(format!("request is not valid UTF-8: {e}"));
            Some(Response::Error(err.to_string()))
        }
    }
}

/// Serve requests from `input` until EOF, writing one response line each.
///
/// Only I/O errors on `input` or `output` end the loop early. Returns the
/// number of requests answered.
pub fn serve<A: Attribute>(
    controller: &LightController<A>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<usize> {
    let mut answered = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let Some(response) = handle_bytes(controller, &line) else {
            continue;
        };
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
        answered += 1;
    }
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::mock;

    #[test]
    fn status_from_result() {
        assert_eq!(Status::from_result(Ok(())).unwrap(), Status::Success);
        assert_eq!(
            Status::from_result(Err(LightError::RoleNotSupported(Role::Wifi))).unwrap(),
            Status::LightNotSupported
        );
    }

    #[test]
    fn status_from_other_error_is_not_success() {
        let err = Status::from_result(Err(LightError::ChannelUnavailable("red".into())));
        assert!(matches!(err, Err(LightError::ChannelUnavailable(_))));
        let err = Status::from_result(Err(LightError::Io(std::io::Error::other("gone"))));
        assert!(err.is_err());
    }

    #[test]
    fn set_light_reports_not_supported() {
        let (ctl, journal) = mock::controller(255);
        assert_eq!(
            set_light(&ctl, Role::Keyboard, LightState::steady(0xFFFF_FFFF)).unwrap(),
            Status::LightNotSupported
        );
        assert!(journal.is_empty());
        assert_eq!(
            set_light(&ctl, Role::Battery, LightState::steady(0xFFFF_FFFF)).unwrap(),
            Status::Success
        );
    }

    #[test]
    fn request_wire_format() {
        let req: Request = serde_json::from_str(
            r#"{"op":"set_light","role":"notifications","state":{"color":255,"flash_mode":"timed","flash_on_ms":500,"flash_off_ms":500}}"#,
        )
        .unwrap();
        assert_eq!(
            req,
            Request::SetLight {
                role: Role::Notifications,
                state: LightState::timed(0x0000_00FF, 500, 500),
            }
        );
        let req: Request = serde_json::from_str(r#"{"op":"get_supported_roles"}"#).unwrap();
        assert_eq!(req, Request::GetSupportedRoles);
    }

    #[test]
    fn response_wire_format() {
        let json = serde_json::to_string(&Response::Status(Status::LightNotSupported)).unwrap();
        assert_eq!(json, r#"{"status":"light_not_supported"}"#);
        let json = serde_json::to_string(&Response::Roles(vec![Role::Battery])).unwrap();
        assert_eq!(json, r#"{"roles":["battery"]}"#);
    }

    #[test]
    fn handle_get_supported_roles() {
        let (ctl, _) = mock::controller(255);
        let Response::Roles(roles) = handle(&ctl, Request::GetSupportedRoles) else {
            panic!("expected roles");
        };
        assert_eq!(roles.len(), 4);
        assert!(roles.contains(&Role::Backlight));
    }

    #[test]
    fn handle_snapshot_reflects_state() {
        let (ctl, _) = mock::controller(255);
        handle(
            &ctl,
            Request::SetLight {
                role: Role::Attention,
                state: LightState::steady(0xFF00_FF00),
            },
        );
        let Response::Snapshot(snap) = handle(&ctl, Request::Snapshot) else {
            panic!("expected snapshot");
        };
        assert_eq!(snap.active, Some(Role::Attention));
    }

    #[test]
    fn handle_line_skips_blank() {
        let (ctl, _) = mock::controller(255);
        assert_eq!(handle_line(&ctl, "   "), None);
    }

    #[test]
    fn handle_line_reports_malformed_json() {
        let (ctl, journal) = mock::controller(255);
        let Some(Response::Error(msg)) = handle_line(&ctl, "{not json") else {
            panic!("expected error");
        };
        assert!(msg.starts_with("Protocol error"));
        assert!(journal.is_empty());
    }

    #[test]
    fn handle_line_reports_unknown_role() {
        let (ctl, _) = mock::controller(255);
        let resp = handle_line(
            &ctl,
            r#"{"op":"set_light","role":"disco","state":{"color":1}}"#,
        );
        assert!(matches!(resp, Some(Response::Error(_))));
    }

    #[test]
    fn serve_answers_each_line() {
        let (ctl, journal) = mock::controller(255);
        let input = concat!(
            r#"{"op":"set_light","role":"battery","state":{"color":4294901760}}"#,
            "\n\n",
            r#"{"op":"set_light","role":"wifi","state":{"color":1}}"#,
            "\n",
            "garbage\n",
            r#"{"op":"get_supported_roles"}"#,
            "\n",
        );
        let mut output = Vec::new();
        let answered = serve(&ctl, input.as_bytes(), &mut output).unwrap();
        assert_eq!(answered, 4);

        let lines: Vec<Response> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0], Response::Status(Status::Success));
        assert_eq!(lines[1], Response::Status(Status::LightNotSupported));
        assert!(matches!(lines[2], Response::Error(_)));
        assert!(matches!(lines[3], Response::Roles(_)));

        assert_eq!(journal.last("red/brightness").as_deref(), Some("255"));
    }

    #[test]
    fn serve_answers_invalid_utf8_and_continues() {
        let (ctl, _) = mock::controller(255);
        let input: &[u8] = b"\xff\xfe garbage\n{\"op\":\"get_supported_roles\"}\n";
        let mut output = Vec::new();
        assert_eq!(serve(&ctl, input, &mut output).unwrap(), 2);

        let lines: Vec<Response> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let Response::Error(msg) = &lines[0] else {
            panic!("expected error, got {:?}", lines[0]);
        };
        assert!(msg.contains("UTF-8"));
        assert!(matches!(&lines[1], Response::Roles(roles) if roles.len() == 4));
    }

    #[test]
    fn serve_handles_last_line_without_newline() {
        let (ctl, _) = mock::controller(255);
        let mut output = Vec::new();
        let answered = serve(&ctl, &b"{\"op\":\"snapshot\"}"[..], &mut output).unwrap();
        assert_eq!(answered, 1);
    }
}
