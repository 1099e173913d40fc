use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rill_diagnostic::SemanticRecorder;
use rill_ir::{Position, Token, TokenKind};

use super::*;

/// Function-body stand-in: notes its tag into the recorder when analyzed.
#[derive(Debug, Default)]
struct Body(&'static str);

impl Analyze for Body {
    fn analyze(&self, recorder: &mut SemanticRecorder) {
        recorder.note(Position::SYNTHESIZED, self.0);
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {} }}", self.0)
    }
}

fn manager() -> ScopeManager<Body> {
    ScopeManager::default()
}

fn named(name: &str, tag: &'static str) -> Function<Body> {
    Function::new(Token::identifier(name, Position::new(1, 1)), Body(tag))
}

fn anon(line: u32, tag: &'static str) -> Function<Body> {
    // Anonymous marker: not an identifier until the engine resolves it.
    Function::new(Token::new(TokenKind::Operator, "|", Position::new(line, 1)), Body(tag))
}

// === Scope lifecycle ===

#[test]
fn starts_with_the_entry_scope() {
    let m = manager();
    assert_eq!(m.depth(), 1);
    assert!(m.is_registered_func(ENTRY_NAME));
}

#[test]
fn bottom_scope_is_never_popped() {
    let mut m = manager();
    m.enter_scope();
    assert_eq!(m.depth(), 2);
    m.leave_scope();
    m.leave_scope();
    m.leave_scope();
    assert_eq!(m.depth(), 1);
}

// === Symbol declaration and lookup ===

#[test]
fn unknown_name_is_not_found_and_leaves_no_trace() {
    let mut m = manager();
    assert!(!m.find_declared_symbol("ghost"));
    assert!(!m.symbol_table().contains("ghost"));
    assert_eq!(m.symbol_table().len(), 0);
}

#[test]
fn register_symbol_is_idempotent() {
    let mut m = manager();
    assert!(m.register_symbol("x"));
    assert!(!m.register_symbol("x"));
    assert!(m.find_declared_symbol("x"));
    assert_eq!(m.symbol_table().len(), 1);
}

#[test]
fn outward_search_sees_outer_declarations() {
    let mut m = manager();
    m.register_symbol("x");
    m.enter_scope();
    assert!(m.find_declared_symbol("x"));
    // ...but the direct probe is innermost-only.
    assert!(!m.find_declared_symbol_direct("x"));
    assert!(!m.is_unique_symbol_of_block("x"));
}

#[test]
fn shadowing_keeps_outer_declaration_intact() {
    let mut m = manager();
    m.register_symbol("x");
    m.enter_scope();
    m.register_symbol("x");
    assert!(m.is_unique_symbol_of_block("x"));

    m.leave_scope();
    assert!(m.find_declared_symbol_direct("x"));
    assert!(m.is_unique_symbol_of_block("x"));
}

#[test]
fn classifier_is_consulted_once_per_name() {
    let calls = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&calls);
    let mut m: ScopeManager<Body> = ScopeManager::new(move |name: &str| {
        counter.set(counter.get() + 1);
        name == "print"
    });

    assert!(m.find_declared_symbol("print"));
    assert_eq!(calls.get(), 1);
    assert!(m.symbol_table().contains("print"));

    // Auto-registered: the second probe never reaches the classifier.
    assert!(m.find_declared_symbol("print"));
    assert_eq!(calls.get(), 1);
}

#[test]
fn classifier_rejection_has_no_side_effect() {
    let mut m: ScopeManager<Body> = ScopeManager::new(|name: &str| name == "print");
    assert!(!m.find_declared_symbol("glyph"));
    assert!(!m.symbol_table().contains("glyph"));
}

// === Forward declarations ===

#[test]
fn future_symbol_flushes_into_the_next_scope() {
    let mut m = manager();
    assert!(m.register_future_symbol("y"));
    assert!(!m.register_future_symbol("y"));
    assert!(m.find_declared_symbol("y"));

    m.enter_scope();
    assert!(m.is_unique_symbol_of_block("y"));
    // Buffer is empty immediately after the flush.
    assert!(m.register_future_symbol("y"));
}

#[test]
fn leave_scope_clears_the_future_buffer() {
    let mut m = manager();
    m.enter_scope();
    m.register_future_symbol("stale");
    m.leave_scope();

    m.enter_scope();
    assert!(!m.is_unique_symbol_of_block("stale"));
    assert!(!m.find_declared_symbol("stale"));
}

// === Function registration ===

#[test]
fn named_function_enters_symbol_table_but_not_scope_symbols() {
    let mut m = manager();
    m.register_func(named("g", "g"));
    assert!(m.is_registered_func("g"));
    assert!(m.symbol_table().contains("g"));
    // The identifier is a unit-wide symbol, not a block-local one.
    assert!(!m.is_unique_symbol_of_block("g"));
}

#[test]
fn overloads_accumulate_in_registration_order() {
    let mut m = manager();
    m.register_func(named("f", "first"));
    m.register_func(named("f", "second"));

    let ids = m.func_registry().get("f").unwrap();
    assert_eq!(ids.len(), 2);

    let mut recorder = SemanticRecorder::new();
    m.check(&mut recorder);
    let visited: Vec<_> = recorder.iter().map(|d| d.message.as_str()).collect();
    // Entry body first (registered at construction), then both
    // definitions of `f` in call order.
    assert_eq!(visited, vec!["", "first", "second"]);
}

#[test]
fn anonymous_function_gets_a_generated_name() {
    let mut m = manager();
    let id = m.register_func(anon(5, "a"));
    let func = m.func_registry().func(id).unwrap();
    assert_eq!(func.real_name(), Some("~lambda#0"));
    assert!(m.is_registered_func("~lambda#0"));
}

#[test]
fn id_counter_is_shared_across_registration_paths() {
    let mut m = manager();
    m.register_func(anon(2, "a"));
    let id = m.register_lambda(anon(7, "b"));
    let func = m.func_registry().func(id).unwrap();
    assert_eq!(func.real_name(), Some("~lambda#1!7"));
}

#[test]
fn func_by_name_prefers_the_innermost_scope() {
    let mut m = manager();
    m.register_func(named("f", "outer"));
    m.enter_scope();
    m.register_func(named("f", "inner"));

    assert_eq!(m.func_by_name("f").unwrap().body().0, "inner");
    m.leave_scope();
    assert_eq!(m.func_by_name("f").unwrap().body().0, "outer");
    assert!(m.func_by_name("h").is_none());
}

// === Lambda registration and recovery ===

#[test]
fn lambda_recovery_is_lifo() {
    let mut m = manager();
    m.register_lambda(anon(3, "l1"));
    m.register_lambda(anon(9, "l2"));

    {
        let second = m.take_lambda().unwrap();
        assert_eq!(second.real_name(), Some("~lambda#1!9"));
        assert_eq!(second.body().0, "l2");
    }
    {
        let first = m.take_lambda().unwrap();
        assert_eq!(first.real_name(), Some("~lambda#0!3"));
        assert_eq!(first.body().0, "l1");
    }
}

#[test]
fn lambda_underflow_is_a_contract_violation() {
    let mut m = manager();
    assert_eq!(m.take_lambda().unwrap_err(), ScopeError::LambdaUnderflow);

    m.register_lambda(anon(4, "l"));
    assert!(m.take_lambda().is_ok());
    assert_eq!(m.take_lambda().unwrap_err(), ScopeError::LambdaUnderflow);
}

#[test]
fn lambda_name_token_is_resolved_to_an_identifier() {
    let mut m = manager();
    let id = m.register_lambda(anon(6, "l"));
    let func = m.func_registry().func(id).unwrap();
    assert!(func.name().is_identifier());
    assert!(is_lambda_name(func.real_name().unwrap()));
}

#[test]
fn lambda_is_reachable_by_its_generated_name() {
    let mut m = manager();
    m.register_lambda(anon(8, "l"));
    assert!(m.is_registered_func("~lambda#0!8"));
    assert_eq!(m.func_by_name("~lambda#0!8").unwrap().body().0, "l");
}

// === Block context (engine surface) ===

#[test]
fn loop_membership_counts_nesting() {
    let mut m = manager();
    m.enter_block(BlockKind::Loop);
    m.enter_block(BlockKind::Loop);
    m.leave_block(BlockKind::Loop);
    assert!(m.is_in_block(BlockKind::Loop));
    m.leave_block(BlockKind::Loop);
    assert!(!m.is_in_block(BlockKind::Loop));
}

#[test]
fn nearest_encloser_decides_function_vs_generator() {
    let mut m = manager();
    m.enter_block(BlockKind::Function);
    m.enter_block(BlockKind::Generator);
    assert!(m.is_in_block(BlockKind::Generator));
    assert!(!m.is_in_block(BlockKind::Function));

    m.leave_block(BlockKind::Generator);
    assert!(m.is_in_block(BlockKind::Function));
}

#[test]
fn mismatched_block_leave_is_swallowed() {
    // Documented policy: leaving the wrong exclusive kind is ignored,
    // not diagnosed.
    let mut m = manager();
    m.enter_block(BlockKind::Function);
    m.leave_block(BlockKind::Generator);
    assert!(m.is_in_block(BlockKind::Function));
}

// === Entry function ===

#[test]
fn entry_accessors() {
    assert_eq!(ScopeManager::<Body>::entry_name(), "main");
    let token = ScopeManager::<Body>::entry_token();
    assert!(token.is_identifier());
    assert_eq!(token.text, "main");
    assert!(!token.pos.is_real());
}

#[test]
fn check_visits_the_entry_body() {
    let m = manager();
    let mut recorder = SemanticRecorder::new();
    m.check(&mut recorder);
    assert_eq!(recorder.len(), 1);
}

// === Dump ===

#[test]
fn symbol_dump_is_indexed_and_deduplicated() {
    let mut m = manager();
    m.register_symbol("a");
    m.register_symbol("b");
    m.register_symbol("a");
    m.register_symbol("c");

    assert_eq!(
        m.symbol_string(),
        "#### symbol table ####\n0: [id] a\n1: [id] b\n2: [id] c\n"
    );
}

#[test]
fn dump_classifies_lambda_names() {
    let mut m = manager();
    m.register_symbol("f");
    // A lambda name reaches the symbol table only through explicit
    // registration; the classification is purely textual.
    m.register_symbol("~lambda#0!2");
    let dump = m.symbol_string();
    assert!(dump.contains("[id] f"));
    assert!(dump.contains("[lambda] ~lambda#0!2"));
}

#[test]
fn display_concatenates_both_tables() {
    let mut m = manager();
    m.register_func(named("f", "body"));
    let dump = m.to_string();
    assert!(dump.contains("#### symbol table ####"));
    assert!(dump.contains("#### function table ####"));
    assert!(dump.contains("func f"));
    assert!(dump.contains("{ body }"));
    // Deterministic across identical runs.
    assert_eq!(dump, m.to_string());
}
