use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// All logical actions the TUI can perform, independent of key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusChat,
    FocusInput,
    /// First key of the Ctrl+w nav chord (vim-style window navigation).
    /// The App will watch for a follow-up key to decide the target pane.
    NavPrefix,

    // Scrolling (in chat pane)
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
    ScrollBottom,

    // Input
    InputChar(char),
    InputNewline,
    InputBackspace,
    InputDelete,
    InputMoveCursorLeft,
    InputMoveCursorRight,
    InputMoveLineStart,
    InputMoveLineEnd,
    InputDeleteToEnd,
    InputDeleteToStart,
    Submit,

    // Session
    CycleTopic,
    CycleDifficulty,

    // App
    Quit,
    Help,
}

/// Map a raw key event to an [`Action`], depending on which pane has focus.
///
/// `pending_nav` — true when a Ctrl+w prefix has been received but not yet
/// resolved.  In that state only j/k (and arrows) are meaningful.
pub fn map_key(event: KeyEvent, in_input: bool, pending_nav: bool) -> Option<Action> {
    let ctrl  = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt   = event.modifiers.contains(KeyModifiers::ALT);
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);
    // "plain" = no modifier that would make a char a control sequence
    let plain = !ctrl && !alt;

    // ── Pending Ctrl+w chord ──────────────────────────────────────────────────
    // After a Ctrl+w prefix, only j/k pick a pane.  Any other key cancels the
    // prefix (returning None causes the App to clear the flag without acting).
    if pending_nav {
        return match event.code {
            KeyCode::Char('k') | KeyCode::Up   => Some(Action::FocusChat),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::FocusInput),
            _ => None, // cancel without action
        };
    }

    match event.code {
        // ── Input-pane overrides come FIRST so they shadow global bindings ────
        // Ctrl+u — delete to line start
        KeyCode::Char('u') if ctrl && in_input => Some(Action::InputDeleteToStart),
        // Ctrl+k — delete to line end
        KeyCode::Char('k') if ctrl && in_input => Some(Action::InputDeleteToEnd),

        // ── Global bindings ───────────────────────────────────────────────────
        KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),

        // Ctrl+w → start the nav-prefix chord (works from any pane)
        KeyCode::Char('w') if ctrl => Some(Action::NavPrefix),

        KeyCode::F(1) => Some(Action::Help),
        KeyCode::F(2) => Some(Action::CycleTopic),
        KeyCode::F(3) => Some(Action::CycleDifficulty),

        // ── Rest of input pane ────────────────────────────────────────────────
        KeyCode::Enter     if in_input && !shift => Some(Action::Submit),
        KeyCode::Enter     if in_input &&  shift => Some(Action::InputNewline),
        KeyCode::Backspace if in_input           => Some(Action::InputBackspace),
        KeyCode::Delete    if in_input           => Some(Action::InputDelete),
        KeyCode::Left      if in_input           => Some(Action::InputMoveCursorLeft),
        KeyCode::Right     if in_input           => Some(Action::InputMoveCursorRight),
        KeyCode::Home      if in_input           => Some(Action::InputMoveLineStart),
        KeyCode::End       if in_input           => Some(Action::InputMoveLineEnd),
        // Printable characters — only when no ctrl/alt modifier
        KeyCode::Char(c) if in_input && plain    => Some(Action::InputChar(c)),

        // ── Chat pane ─────────────────────────────────────────────────────────
        KeyCode::Up   | KeyCode::Char('k') if !in_input && plain => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') if !in_input && plain => Some(Action::ScrollDown),
        KeyCode::Char('u') if ctrl && !in_input  => Some(Action::ScrollPageUp),
        KeyCode::Char('d') if ctrl && !in_input  => Some(Action::ScrollPageDown),
        KeyCode::Char('g') if !in_input && plain => Some(Action::ScrollTop),
        KeyCode::Char('G') if !in_input          => Some(Action::ScrollBottom),

        _ => None,
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
