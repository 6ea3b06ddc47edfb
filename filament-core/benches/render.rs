use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filament_core::reactive::Signal;
use filament_core::pipeline::Html5everMaterializer;
use filament_core::template::{assemble, ContextScanner, Value};
use filament_core::{html, NodeRef, RawHtml};

const ROWS: usize = 200;

fn make_rows(rows: usize) -> String {
    let mut out = String::with_capacity(rows * 48);
    for i in 0..rows {
        out.push_str("<tr class=\"row\"><td>");
        out.push_str(&i.to_string());
        out.push_str("</td><td title=\"cell\">value</td></tr>\n");
    }
    out
}

fn bench_scanner(c: &mut Criterion) {
    let input = make_rows(ROWS);
    c.bench_function("bench_scanner_rows", |b| {
        b.iter(|| {
            let mut scanner = ContextScanner::new();
            scanner.feed(black_box(&input));
            black_box(scanner.assignment());
        });
    });
}

fn bench_assemble(c: &mut Criterion) {
    let color = Signal::new(String::from("red"));
    c.bench_function("bench_assemble_mixed", |b| {
        b.iter(|| {
            let assembly = assemble(
                &["<div color=", "><p>", "</p>", "</div>"],
                vec![Value::from(&color), Value::from(black_box(42_i32)), Value::from(NodeRef::element("hr"))],
                &Html5everMaterializer,
            );
            black_box(assembly.registry.len());
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let table = make_rows(ROWS);
    c.bench_function("bench_render_table", |b| {
        b.iter(|| {
            let fragment = html(
                &["<table><caption>", "</caption><tbody>", "</tbody></table>"],
                vec![Value::from("ready"), Value::from(RawHtml::new(table.as_str()))],
            );
            black_box(fragment.child_nodes().len());
        });
    });
}

criterion_group!(benches, bench_scanner, bench_assemble, bench_render);
criterion_main!(benches);
