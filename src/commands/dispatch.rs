// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Line command dispatcher - parse, validate, execute, render
//!
//! Each input line is one command. Parsing checks argument shape and id
//! formats; catalog and registry checks happen during execution. Every
//! failure renders as `unsuccessful`.

use crate::campus::Campus;
use crate::routes::{ScheduleCheck, ScheduleReport, TravelReport, ZoneReport};
use crate::types::{EdgeStatus, StudentRecord, Vertex};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Most classes a student may enroll in at once
pub const MAX_CLASSES: usize = 6;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `insert "NAME" UFID RESIDENCE N CODE...`
    Insert {
        /// Student name
        name: String,
        /// Student id
        ufid: String,
        /// Residence location
        residence: Vertex,
        /// Class codes
        codes: Vec<String>,
    },
    /// `remove UFID`
    Remove {
        /// Student id
        ufid: String,
    },
    /// `dropClass UFID CODE`
    DropClass {
        /// Student id
        ufid: String,
        /// Class to drop
        code: String,
    },
    /// `replaceClass UFID FROM TO`
    ReplaceClass {
        /// Student id
        ufid: String,
        /// Class to give up
        from: String,
        /// Class to take instead
        to: String,
    },
    /// `removeClass CODE`
    RemoveClass {
        /// Class removed from every student
        code: String,
    },
    /// `toggleEdgesClosure N u1 v1 ... uN vN`
    ToggleEdges(Vec<(Vertex, Vertex)>),
    /// `checkEdgeStatus u v`
    CheckEdgeStatus(Vertex, Vertex),
    /// `isConnected u v`
    IsConnected(Vertex, Vertex),
    /// `printShortestEdges UFID`
    PrintShortestEdges(String),
    /// `printStudentZone UFID`
    PrintStudentZone(String),
    /// `verifySchedule UFID`
    VerifySchedule(String),
}

/// Why a line could not be turned into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// The first word is not a known command
    UnknownCommand(String),
    /// The command is known but its arguments are not valid
    InvalidArguments(&'static str),
}

impl Command {
    /// Parse a single command line
    pub fn parse(line: &str) -> Result<Self, ParseFailure> {
        let mut words = line.split_whitespace();
        let keyword = words.next().unwrap_or_default();

        match keyword {
            "insert" => parse_insert(line),
            "remove" => {
                let [ufid] = take::<1>(&mut words, "remove")?;
                Ok(Self::Remove { ufid: student_id(ufid)? })
            }
            "dropClass" => {
                let [ufid, code] = take::<2>(&mut words, "dropClass")?;
                Ok(Self::DropClass {
                    ufid: student_id(ufid)?,
                    code: class_code(code)?,
                })
            }
            "replaceClass" => {
                let [ufid, from, to] = take::<3>(&mut words, "replaceClass")?;
                Ok(Self::ReplaceClass {
                    ufid: student_id(ufid)?,
                    from: class_code(from)?,
                    to: class_code(to)?,
                })
            }
            "removeClass" => {
                let [code] = take::<1>(&mut words, "removeClass")?;
                Ok(Self::RemoveClass { code: class_code(code)? })
            }
            "toggleEdgesClosure" => parse_toggle(words),
            "checkEdgeStatus" => {
                let [u, v] = take::<2>(&mut words, "checkEdgeStatus")?;
                Ok(Self::CheckEdgeStatus(vertex(u)?, vertex(v)?))
            }
            "isConnected" => {
                let [u, v] = take::<2>(&mut words, "isConnected")?;
                Ok(Self::IsConnected(vertex(u)?, vertex(v)?))
            }
            "printShortestEdges" => {
                let [ufid] = take::<1>(&mut words, "printShortestEdges")?;
                Ok(Self::PrintShortestEdges(student_id(ufid)?))
            }
            "printStudentZone" => {
                let [ufid] = take::<1>(&mut words, "printStudentZone")?;
                Ok(Self::PrintStudentZone(student_id(ufid)?))
            }
            "verifySchedule" => {
                let [ufid] = take::<1>(&mut words, "verifySchedule")?;
                Ok(Self::VerifySchedule(student_id(ufid)?))
            }
            other => Err(ParseFailure::UnknownCommand(other.to_string())),
        }
    }
}

/// Take the first `N` words; extra trailing words are ignored
fn take<'a, const N: usize>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<[&'a str; N], ParseFailure> {
    let mut out = [""; N];
    for slot in &mut out {
        *slot = words.next().ok_or(ParseFailure::InvalidArguments(command))?;
    }
    Ok(out)
}

fn parse_insert(line: &str) -> Result<Command, ParseFailure> {
    const BAD: ParseFailure = ParseFailure::InvalidArguments("insert");

    let open = line.find('"').ok_or(BAD)?;
    let close = line[open + 1..].find('"').ok_or(BAD)? + open + 1;
    let name = &line[open + 1..close];

    let mut words = line[close + 1..].split_whitespace();
    let [ufid, residence, count] = take::<3>(&mut words, "insert")?;
    let residence = vertex(residence)?;
    let count: usize = count.parse().map_err(|_| BAD)?;
    let codes: Vec<&str> = words.collect();

    if !(1..=MAX_CLASSES).contains(&count) || codes.len() != count {
        return Err(BAD);
    }
    if !is_valid_name(name) {
        return Err(BAD);
    }
    let ufid = student_id(ufid)?;

    let mut seen = HashSet::new();
    let mut classes = Vec::with_capacity(codes.len());
    for code in codes {
        if !seen.insert(code) {
            return Err(BAD);
        }
        classes.push(class_code(code)?);
    }

    Ok(Command::Insert {
        name: name.to_string(),
        ufid,
        residence,
        codes: classes,
    })
}

fn parse_toggle<'a>(mut words: impl Iterator<Item = &'a str>) -> Result<Command, ParseFailure> {
    const BAD: ParseFailure = ParseFailure::InvalidArguments("toggleEdgesClosure");

    let count: usize = words.next().and_then(|w| w.parse().ok()).ok_or(BAD)?;
    let ids = words.map(vertex).collect::<Result<Vec<_>, _>>()?;
    if count.checked_mul(2) != Some(ids.len()) {
        return Err(BAD);
    }
    Ok(Command::ToggleEdges(
        ids.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect(),
    ))
}

fn vertex(word: &str) -> Result<Vertex, ParseFailure> {
    word.parse()
        .map_err(|_| ParseFailure::InvalidArguments("location id"))
}

fn student_id(word: &str) -> Result<String, ParseFailure> {
    if is_valid_ufid(word) {
        Ok(word.to_string())
    } else {
        Err(ParseFailure::InvalidArguments("student id"))
    }
}

fn class_code(word: &str) -> Result<String, ParseFailure> {
    if is_valid_class_code(word) {
        Ok(word.to_string())
    } else {
        Err(ParseFailure::InvalidArguments("class code"))
    }
}

/// Exactly eight ASCII digits
#[must_use]
pub fn is_valid_ufid(ufid: &str) -> bool {
    ufid.len() == 8 && ufid.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty, letters and spaces only
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

/// Three uppercase letters followed by four digits
#[must_use]
pub fn is_valid_class_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 7
        && bytes[..3].iter().all(u8::is_ascii_uppercase)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

/// Structured result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The command succeeded
    Success,
    /// The command failed or was not applicable
    Failure,
    /// Number of students affected by `removeClass`
    Count(usize),
    /// Walkway state for `checkEdgeStatus`
    Status(EdgeStatus),
    /// Travel times for `printShortestEdges`
    Travel(TravelReport),
    /// Zone cost for `printStudentZone`
    Zone(ZoneReport),
    /// Schedule check for `verifySchedule`
    Schedule(ScheduleReport),
}

impl Reply {
    fn from_bool(ok: bool) -> Self {
        if ok {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => writeln!(f, "successful"),
            Self::Failure => writeln!(f, "unsuccessful"),
            Self::Count(n) => writeln!(f, "{n}"),
            Self::Status(status) => writeln!(f, "{status}"),
            Self::Travel(report) => {
                writeln!(f, "Name: {}", report.student)?;
                for class in &report.classes {
                    let minutes = class.minutes.map_or(-1, i128::from);
                    writeln!(f, "{} | Total Time: {}", class.code, minutes)?;
                }
                Ok(())
            }
            Self::Zone(report) => {
                writeln!(f, "Student Zone Cost For {}: {}", report.student, report.cost)
            }
            Self::Schedule(report) => match &report.check {
                ScheduleCheck::NotApplicable => writeln!(f, "unsuccessful"),
                ScheduleCheck::Checked(transitions) => {
                    writeln!(f, "Schedule Check for {}:", report.student)?;
                    for t in transitions {
                        let verdict = if t.feasible { "Can make it!" } else { "Cannot make it!" };
                        writeln!(f, "{} - {} {}", t.from, t.to, verdict)?;
                    }
                    Ok(())
                }
            },
        }
    }
}

/// Parse and execute one line against the campus
pub fn execute_line(campus: &mut Campus, line: &str) -> Reply {
    match Command::parse(line) {
        Ok(command) => execute(campus, command),
        Err(failure) => {
            debug!(?failure, line, "rejected command");
            Reply::Failure
        }
    }
}

/// Execute a parsed command
pub fn execute(campus: &mut Campus, command: Command) -> Reply {
    match command {
        Command::Insert {
            name,
            ufid,
            residence,
            codes,
        } => {
            if !codes.iter().all(|c| campus.catalog.contains(c)) {
                return Reply::Failure;
            }
            let student = StudentRecord::new(ufid, name, residence, codes);
            Reply::from_bool(campus.students.insert(student).is_ok())
        }
        Command::Remove { ufid } => Reply::from_bool(campus.students.remove(&ufid).is_ok()),
        Command::DropClass { ufid, code } => {
            if !campus.catalog.contains(&code) {
                return Reply::Failure;
            }
            Reply::from_bool(campus.students.drop_class(&ufid, &code).is_ok())
        }
        Command::ReplaceClass { ufid, from, to } => {
            if !campus.catalog.contains(&from) || !campus.catalog.contains(&to) {
                return Reply::Failure;
            }
            Reply::from_bool(campus.students.replace_class(&ufid, &from, &to).is_ok())
        }
        Command::RemoveClass { code } => Reply::Count(campus.students.remove_class_from_all(&code)),
        Command::ToggleEdges(pairs) => {
            for (u, v) in pairs {
                campus.graph.toggle_edge(u, v);
            }
            Reply::Success
        }
        Command::CheckEdgeStatus(u, v) => Reply::Status(campus.graph.edge_status(u, v)),
        Command::IsConnected(u, v) => Reply::from_bool(campus.graph.is_connected(u, v)),
        Command::PrintShortestEdges(ufid) => campus
            .routes()
            .class_travel_times(&ufid)
            .map_or(Reply::Failure, Reply::Travel),
        Command::PrintStudentZone(ufid) => campus
            .routes()
            .zone_cost(&ufid)
            .map_or(Reply::Failure, Reply::Zone),
        Command::VerifySchedule(ufid) => campus
            .routes()
            .verify_schedule(&ufid)
            .map_or(Reply::Failure, Reply::Schedule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassRecord;

    fn campus() -> Campus {
        let mut campus = Campus::new();
        campus.graph.add_edge(1, 2, 5);
        campus.graph.add_edge(2, 3, 5);
        campus.graph.add_edge(1, 3, 20);
        campus.catalog.insert(ClassRecord::new("COP3530", 3, 540, 600));
        campus.catalog.insert(ClassRecord::new("MAC2311", 2, 605, 650));
        campus.catalog.insert(ClassRecord::new("PHY2048", 1, 700, 750));
        campus
    }

    fn run(campus: &mut Campus, line: &str) -> String {
        execute_line(campus, line).to_string()
    }

    #[test]
    fn test_validators() {
        assert!(is_valid_ufid("12345678"));
        assert!(!is_valid_ufid("1234567"));
        assert!(!is_valid_ufid("1234567a"));
        assert!(is_valid_name("Brandon Smith"));
        assert!(!is_valid_name("Brandon2"));
        assert!(!is_valid_name(""));
        assert!(is_valid_class_code("COP3530"));
        assert!(!is_valid_class_code("cop3530"));
        assert!(!is_valid_class_code("COP353"));
    }

    #[test]
    fn test_parse_insert() {
        let command = Command::parse(r#"insert "Ada Lovelace" 12345678 1 2 COP3530 MAC2311"#).unwrap();
        assert_eq!(
            command,
            Command::Insert {
                name: "Ada Lovelace".into(),
                ufid: "12345678".into(),
                residence: 1,
                codes: vec!["COP3530".into(), "MAC2311".into()],
            }
        );
    }

    #[test]
    fn test_parse_insert_rejects_bad_shapes() {
        for line in [
            r#"insert Ada 12345678 1 1 COP3530"#,
            r#"insert "Ada" 12345678 1 2 COP3530"#,
            r#"insert "Ada" 12345678 1 0"#,
            r#"insert "Ada" 12345678 1 7 AAA0001 AAA0002 AAA0003 AAA0004 AAA0005 AAA0006 AAA0007"#,
            r#"insert "Ada9" 12345678 1 1 COP3530"#,
            r#"insert "Ada" 1234 1 1 COP3530"#,
            r#"insert "Ada" 12345678 1 2 COP3530 COP3530"#,
            r#"insert "Ada" 12345678 x 1 COP3530"#,
        ] {
            assert!(Command::parse(line).is_err(), "accepted: {line}");
        }
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("teleport 1 2"),
            Err(ParseFailure::UnknownCommand("teleport".into()))
        );
        assert_eq!(run(&mut campus(), ""), "unsuccessful\n");
    }

    #[test]
    fn test_insert_requires_catalog_and_unique_id() {
        let mut campus = campus();

        assert_eq!(run(&mut campus, r#"insert "Ada" 12345678 1 1 CHM2045"#), "unsuccessful\n");
        assert_eq!(run(&mut campus, r#"insert "Ada" 12345678 1 1 COP3530"#), "successful\n");
        assert_eq!(run(&mut campus, r#"insert "Bob" 12345678 1 1 COP3530"#), "unsuccessful\n");
    }

    #[test]
    fn test_student_lifecycle() {
        let mut campus = campus();
        run(&mut campus, r#"insert "Ada" 12345678 1 2 COP3530 MAC2311"#);

        assert_eq!(run(&mut campus, "replaceClass 12345678 MAC2311 PHY2048"), "successful\n");
        assert_eq!(run(&mut campus, "replaceClass 12345678 MAC2311 PHY2048"), "unsuccessful\n");
        assert_eq!(run(&mut campus, "dropClass 12345678 COP3530"), "successful\n");
        assert_eq!(run(&mut campus, "dropClass 12345678 COP3530"), "unsuccessful\n");
        assert_eq!(run(&mut campus, "removeClass PHY2048"), "1\n");
        assert_eq!(run(&mut campus, "remove 12345678"), "unsuccessful\n");
    }

    #[test]
    fn test_edge_commands() {
        let mut campus = campus();

        assert_eq!(run(&mut campus, "checkEdgeStatus 1 2"), "open\n");
        assert_eq!(run(&mut campus, "toggleEdgesClosure 2 1 2 3 2"), "successful\n");
        assert_eq!(run(&mut campus, "checkEdgeStatus 2 1"), "closed\n");
        assert_eq!(run(&mut campus, "checkEdgeStatus 2 3"), "closed\n");
        assert_eq!(run(&mut campus, "checkEdgeStatus 1 9"), "DNE\n");
        assert_eq!(run(&mut campus, "isConnected 1 2"), "unsuccessful\n");
        assert_eq!(run(&mut campus, "toggleEdgesClosure 1 1 2"), "successful\n");
        assert_eq!(run(&mut campus, "isConnected 1 2"), "successful\n");
        assert_eq!(run(&mut campus, "toggleEdgesClosure 2 1 2"), "unsuccessful\n");
        assert_eq!(run(&mut campus, "toggleEdgesClosure -1"), "unsuccessful\n");
        assert_eq!(
            run(&mut campus, "toggleEdgesClosure 18446744073709551615 1 2"),
            "unsuccessful\n"
        );
    }

    #[test]
    fn test_query_rendering() {
        let mut campus = campus();
        run(&mut campus, r#"insert "Ada Lovelace" 12345678 1 2 MAC2311 COP3530"#);

        assert_eq!(
            run(&mut campus, "printShortestEdges 12345678"),
            "Name: Ada Lovelace\nCOP3530 | Total Time: 10\nMAC2311 | Total Time: 5\n"
        );
        assert_eq!(
            run(&mut campus, "printStudentZone 12345678"),
            "Student Zone Cost For Ada Lovelace: 10\n"
        );
        assert_eq!(
            run(&mut campus, "verifySchedule 12345678"),
            "Schedule Check for Ada Lovelace:\nCOP3530 - MAC2311 Can make it!\n"
        );
        assert_eq!(run(&mut campus, "printStudentZone 87654321"), "unsuccessful\n");
    }

    #[test]
    fn test_unreachable_renders_minus_one() {
        let mut campus = campus();
        campus.catalog.insert(ClassRecord::new("CHM2045", 99, 800, 850));
        run(&mut campus, r#"insert "Ada" 12345678 1 1 CHM2045"#);

        assert_eq!(
            run(&mut campus, "printShortestEdges 12345678"),
            "Name: Ada\nCHM2045 | Total Time: -1\n"
        );
        assert_eq!(run(&mut campus, "verifySchedule 12345678"), "unsuccessful\n");
    }
}
