// src/commands/chmod/mod.rs
use async_trait::async_trait;
use regex_lite::Regex;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::error::{ShellError, VfsResultExt};
use crate::fs::MODE_MASK;

pub struct ChmodCommand;

const HELP: &str = "Usage: chmod MODE PATH

Change the permission bits of PATH.
MODE is octal (755, 0644) or symbolic ([ugoa]*[+-=][rwxXst]*, comma-separated).";

lazy_static::lazy_static! {
    static ref SYMBOLIC_CLAUSE: Regex =
        Regex::new(r"^([ugoa]*)([+\-=])([rwxXst]*)$").expect("valid symbolic mode pattern");
}

#[async_trait]
impl Command for ChmodCommand {
    fn name(&self) -> &'static str { "chmod" }

    fn help(&self) -> &'static str { HELP }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let (mode_arg, file) = match ctx.args.as_slice() {
            [mode, file] => (mode, file),
            [] | [_] => return Err(ShellError::usage("chmod", "missing operand")),
            _ => return Err(ShellError::usage("chmod", "expected MODE PATH")),
        };
        let invalid = || ShellError::InvalidMode { command: "chmod".into(), mode: mode_arg.clone() };

        // Reject malformed modes before touching the tree.
        parse_mode(mode_arg, 0).ok_or_else(invalid)?;

        let session = ctx.session;
        let target = session.vfs.resolve(session.cwd, file).for_command("chmod")?;
        let current = session.vfs.node(target).mode();
        let mode = parse_mode(mode_arg, current).ok_or_else(invalid)?;
        session.vfs.set_mode(target, mode);
        Ok(String::new())
    }
}

/// Parse an octal or symbolic mode, applying symbolic clauses to `current_mode`.
pub fn parse_mode(mode_str: &str, current_mode: u32) -> Option<u32> {
    if mode_str.is_empty() {
        return None;
    }
    if mode_str.bytes().all(|c| c.is_ascii_digit()) {
        return u32::from_str_radix(mode_str, 8).ok().filter(|m| *m <= MODE_MASK);
    }

    let mut mode = current_mode & MODE_MASK;
    for part in mode_str.split(',') {
        let caps = SYMBOLIC_CLAUSE.captures(part)?;
        let mut who = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let op = caps.get(2).map_or("", |m| m.as_str());
        let perms = caps.get(3).map_or("", |m| m.as_str());
        if who.is_empty() || who.contains('a') { who = "ugo".to_string(); }

        let mut pb: u32 = 0;
        if perms.contains('r') { pb |= 4; }
        if perms.contains('w') { pb |= 2; }
        if perms.contains('x') || perms.contains('X') { pb |= 1; }

        let mut sb: u32 = 0;
        let mut sb_scope: u32 = 0;
        if who.contains('u') { sb_scope |= 0o4000; }
        if who.contains('g') { sb_scope |= 0o2000; }
        if who.contains('o') { sb_scope |= 0o1000; }
        if perms.contains('s') { sb |= 0o6000 & sb_scope; }
        if perms.contains('t') { sb |= 0o1000; }

        for w in who.chars() {
            let sh: u32 = match w { 'u' => 6, 'g' => 3, 'o' => 0, _ => continue };
            let bits = pb << sh;
            match op {
                "+" => mode |= bits,
                "-" => mode &= !bits,
                _ => { mode &= !(7 << sh); mode |= bits; }
            }
        }
        match op {
            "+" => mode |= sb,
            "-" => mode &= !sb,
            _ => { mode &= !(sb_scope & 0o7000); mode |= sb; }
        }
    }
    Some(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::session::test_support::session_with;
    use crate::shell::Session;

    async fn chmod(session: &mut Session, args: &[&str]) -> CommandResult {
        let ctx = CommandContext { args: args.iter().map(|s| s.to_string()).collect(), session };
        ChmodCommand.execute(ctx).await
    }

    fn mode_of(session: &Session, path: &str) -> u32 {
        let id = session.vfs.resolve(session.cwd, path).unwrap();
        session.vfs.node(id).mode()
    }

    #[tokio::test]
    async fn test_chmod_octal_roundtrip() {
        let mut s = session_with(&["t.txt", "dir/"]);
        for mode in [0o755, 0o600, 0o000, 0o4711, 0o7777] {
            let octal = format!("{:o}", mode);
            chmod(&mut s, &[octal.as_str(), "t.txt"]).await.unwrap();
            assert_eq!(mode_of(&s, "t.txt"), mode);
        }
        chmod(&mut s, &["0700", "dir"]).await.unwrap();
        assert_eq!(mode_of(&s, "dir"), 0o700);
    }
    #[tokio::test]
    async fn test_chmod_symbolic() {
        let mut s = session_with(&["t.txt"]);
        chmod(&mut s, &["u+x", "t.txt"]).await.unwrap();
        assert_eq!(mode_of(&s, "t.txt"), 0o744);
        chmod(&mut s, &["go-r,u-w", "t.txt"]).await.unwrap();
        assert_eq!(mode_of(&s, "t.txt"), 0o500);
    }
    #[tokio::test]
    async fn test_chmod_missing() { let mut s = session_with(&[]); let r = chmod(&mut s, &[]).await; assert_eq!(r.unwrap_err().to_string(), "chmod: missing operand"); }
    #[tokio::test]
    async fn test_chmod_nofile() { let mut s = session_with(&[]); let r = chmod(&mut s, &["755", "/x"]).await; assert!(matches!(r, Err(ShellError::NotFound { .. }))); }
    #[tokio::test]
    async fn test_chmod_invalid() {
        let mut s = session_with(&["t.txt"]);
        for bad in ["xyz", "8", "17777", "u+q", ""] {
            let r = chmod(&mut s, &[bad, "t.txt"]).await;
            assert!(matches!(r, Err(ShellError::InvalidMode { .. })), "mode {:?}", bad);
        }
        // Invalid mode is reported even when the target is missing.
        let r = chmod(&mut s, &["abc", "/missing"]).await;
        assert!(matches!(r, Err(ShellError::InvalidMode { .. })));
        assert_eq!(mode_of(&s, "t.txt"), 0o644);
    }
    #[test]
    fn test_parse_numeric() { assert_eq!(parse_mode("755", 0), Some(0o755)); assert_eq!(parse_mode("0644", 0), Some(0o644)); assert_eq!(parse_mode("9", 0), None); }
    #[test]
    fn test_parse_symbolic() { assert_eq!(parse_mode("u+x", 0o644), Some(0o744)); assert_eq!(parse_mode("a+x", 0o644), Some(0o755)); assert_eq!(parse_mode("g-w", 0o664), Some(0o644)); assert_eq!(parse_mode("u=rwx", 0o644), Some(0o744)); assert_eq!(parse_mode("+x", 0o600), Some(0o711)); }
    #[test]
    fn test_parse_special_bits() { assert_eq!(parse_mode("u+s", 0o755), Some(0o4755)); assert_eq!(parse_mode("+t", 0o777), Some(0o1777)); assert_eq!(parse_mode("u-s", 0o4755), Some(0o755)); }
}
