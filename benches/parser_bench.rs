use criterion::{black_box, criterion_group, criterion_main, Criterion};
use symposium::{parse, ScheduleMapping, VenueProfile};

fn clock(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    let suffix = if h >= 12 { "pm" } else { "am" };
    let h12 = match h % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12}:{m:02} {suffix}")
}

/// A full day: seven rooms, 24 slots each, with link noise.
fn sample_lines() -> Vec<String> {
    let venue = VenueProfile::default();
    let mut lines = vec!["Class of 2026 ORFE Thesis Symposium".to_string()];
    for header in &venue.room_headers {
        lines.push(header.clone());
        lines.push("ORFE Advisors: A. Smith, K. Patel PhD Candidate Graders: B. Jones".into());
        for slot in 0..24u32 {
            let start = clock(9 * 60 + slot * 15);
            let end = clock(9 * 60 + slot * 15 + 15);
            lines.push(format!("{start} – {end}"));
            lines.push("Link downloads document".into());
            lines.push(format!("Presenter {slot} Link downloads document"));
        }
    }
    lines
}

fn bench_parse(c: &mut Criterion) {
    let lines = sample_lines();
    let venue = VenueProfile::default();
    c.bench_function("parse(7 rooms x 24 slots)", |b| {
        b.iter(|| parse(black_box(&lines), black_box(&venue)));
    });
}

fn bench_digest(c: &mut Criterion) {
    let rooms: ScheduleMapping = parse(&sample_lines(), &VenueProfile::default());
    c.bench_function("digest(7 rooms x 24 slots)", |b| {
        b.iter(|| black_box(&rooms).digest().unwrap());
    });
}

fn bench_page_lines(c: &mut Criterion) {
    let html: String = sample_lines()
        .iter()
        .map(|l| format!("<div>{l}</div>\n"))
        .collect();
    c.bench_function("page_lines(7 rooms)", |b| {
        b.iter(|| symposium::page_lines(black_box(&html)));
    });
}

criterion_group!(benches, bench_parse, bench_digest, bench_page_lines);
criterion_main!(benches);
