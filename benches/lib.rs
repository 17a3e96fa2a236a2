/*!
# Benchmark: `prettymin`
*/

use criterion::{
	Criterion,
	criterion_group,
	criterion_main,
};
use prettymin::{
	Config,
	Document,
	PrettyMin,
};
use std::hint::black_box;



/// # Test Document.
const DOCUMENT: &[u8] = include_bytes!("../skel/test-assets/document.html");

/// # Test Fragment.
const FRAGMENT: &[u8] = include_bytes!("../skel/test-assets/fragment.html");



fn parse(c: &mut Criterion) {
	let mut group = c.benchmark_group("prettymin::Document::parse");

	for (name, raw) in [("document.html", DOCUMENT), ("fragment.html", FRAGMENT)] {
		group.bench_function(name, move |b| {
			b.iter(|| Document::parse(black_box(raw)))
		});
	}

	group.finish();
}

fn minify(c: &mut Criterion) {
	let mut group = c.benchmark_group("prettymin::PrettyMin::minify");
	let pm = PrettyMin::new(Config::default()).unwrap();
	let doc = Document::parse(DOCUMENT).unwrap();

	group.bench_function("document.html", |b| {
		b.iter_with_setup(
			|| doc.clone(),
			|mut d| pm.minify(&mut d),
		)
	});

	group.finish();
}

fn indent(c: &mut Criterion) {
	let mut group = c.benchmark_group("prettymin::PrettyMin::indent");
	let pm = PrettyMin::new(Config::default()).unwrap();

	for (name, raw) in [("document.html", DOCUMENT), ("fragment.html", FRAGMENT)] {
		let doc = Document::parse(raw).unwrap();
		group.bench_function(name, |b| {
			b.iter_with_setup(
				|| doc.clone(),
				|mut d| { pm.indent(&mut d); d },
			)
		});
	}

	group.finish();
}

fn serialize(c: &mut Criterion) {
	let mut group = c.benchmark_group("prettymin::Document::serialize");
	let doc = Document::parse(DOCUMENT).unwrap();

	group.bench_function("document.html", |b| {
		b.iter(|| black_box(&doc).serialize())
	});

	group.finish();
}



criterion_group!(
	benches,
	parse,
	minify,
	indent,
	serialize,
);
criterion_main!(benches);
