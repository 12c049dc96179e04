use super::*;

#[test]
fn not_drawing_before_first_page() {
    let mut canvas = MemoryCanvas::new(100.0, 1.0);
    assert!(!canvas.is_drawing());
    assert_eq!(0, canvas.current_length());
    assert_eq!(Surface::Page(0), canvas.active_surface());
    canvas.emit("q");
    assert_eq!(None, canvas.content(Surface::Page(0)));
    assert_eq!(None, canvas.content(Surface::Page(1)));
}

#[test]
fn emit_to_page() {
    let mut canvas = MemoryCanvas::new(100.0, 1.0);
    assert_eq!(1, canvas.add_page());
    assert!(canvas.is_drawing());
    canvas.emit("q");
    canvas.emit("Q");
    assert_eq!(4, canvas.current_length());
    assert_eq!(Some(&b"q\nQ\n"[..]), canvas.content(Surface::Page(1)));

    assert_eq!(2, canvas.add_page());
    assert_eq!(Surface::Page(2), canvas.active_surface());
    assert_eq!(0, canvas.current_length());
    assert_eq!(Some(&b""[..]), canvas.content(Surface::Page(2)));
}

#[test]
fn emit_to_template() {
    let mut canvas = MemoryCanvas::a4_mm();
    canvas.add_page();
    canvas.emit("q");
    canvas.start_template(7);
    assert_eq!(Surface::Template(7), canvas.active_surface());
    assert_eq!(0, canvas.current_length());
    canvas.emit("Q");
    assert_eq!(Some(7), canvas.end_template());
    assert_eq!(None, canvas.end_template());

    assert_eq!(Surface::Page(1), canvas.active_surface());
    assert_eq!(Some(&b"q\n"[..]), canvas.content(Surface::Page(1)));
    assert_eq!(Some(&b"Q\n"[..]), canvas.content(Surface::Template(7)));
}

#[test]
fn cursor_and_geometry() {
    let mut canvas = MemoryCanvas::a4_mm();
    canvas.set_cursor(10.0, 20.0);
    assert_eq!(10.0, canvas.cursor_x());
    assert_eq!(20.0, canvas.cursor_y());
    assert_eq!(297.0, canvas.page_height());
    assert_eq!(72.0 / 25.4, canvas.unit_scale());

    canvas.add_page();
    assert_eq!(0.0, canvas.cursor_x());
    canvas.finish();
    assert!(!canvas.is_drawing());
}
