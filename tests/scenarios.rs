//! End-to-end scenarios with the real `o200k_base` counter.

use lexslab::{
    chunk_provisions, index_chunks, load_provisions, save_provisions, Chunk, MemoryIndex,
    O200kCounter, Paragraph, Provision, ProvisionKind, TokenCounter, DEFAULT_BATCH_SIZE,
    MAX_TOKENS,
};

const SENTENCES: [&str; 4] = [
    "Providers of high-risk AI systems shall ensure that their systems comply with the requirements set out in this Section.",
    "Deployers shall take appropriate technical and organisational measures to ensure they use such systems in accordance with the instructions for use.",
    "The market surveillance authority may require the operator to take all appropriate corrective actions within a prescribed period.",
    "Member States shall lay down the rules on penalties and other enforcement measures applicable to infringements of this Regulation.",
];

/// Sentences appended until the text reaches at least `tokens` tokens.
fn prose(counter: &O200kCounter, tokens: usize) -> String {
    let mut text = String::new();
    let mut i = 0;
    while counter.count_tokens(&text) < tokens {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(SENTENCES[i % SENTENCES.len()]);
        i += 1;
    }
    text
}

/// Comma-separated clauses with no `.` or `;` boundary, at least `tokens` long.
fn unsplittable(counter: &O200kCounter, tokens: usize) -> String {
    let mut text = String::from("the following areas");
    let mut i = 0;
    while counter.count_tokens(&text) < tokens {
        text.push_str(", biometric identification and categorisation of natural persons in area ");
        text.push_str(&i.to_string());
        i += 1;
    }
    text
}

#[test]
fn article_with_three_paragraphs_splits_in_two() {
    let counter = O200kCounter::new().unwrap();
    let paragraphs: Vec<Paragraph> = (1..=3)
        .map(|i| Paragraph::new(format!("005.{i:03}"), format!("{i}. {}", prose(&counter, 300))))
        .collect();
    let article = Provision::article("art_5", "5", "Article 5", "")
        .with_chapter("II", "PROHIBITED AI PRACTICES")
        .with_paragraphs(paragraphs.clone());

    let chunks = chunk_provisions(&[article]).unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].id, "art_5");
    assert_eq!(
        chunks[0].text,
        format!("Article 5\n\n{}\n\n{}", paragraphs[0].text, paragraphs[1].text)
    );
    assert_eq!(chunks[1].id, "art_5#1");
    assert_eq!(chunks[1].text, format!("Article 5\n\n{}", paragraphs[2].text));
    for chunk in &chunks {
        assert!(counter.count_tokens(&chunk.text) <= MAX_TOKENS);
        assert_eq!(chunk.metadata.chapter.as_deref(), Some("II"));
    }
}

#[test]
fn short_recital_is_one_chunk_with_bare_id() {
    let counter = O200kCounter::new().unwrap();
    let text = prose(&counter, 40);
    let recital = Provision::recital("rct_42", "42", "Recital 42", text.clone());

    let chunks = chunk_provisions(&[recital]).unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].id, "rct_42");
    assert_eq!(chunks[0].text, format!("Recital 42\n\n{text}"));
    assert_eq!(chunks[0].metadata.kind, ProvisionKind::Recital);
    assert_eq!(chunks[0].metadata.chunk_idx, 0);
}

#[test]
fn annex_with_unsplittable_prefix_emits_one_oversized_chunk() {
    let counter = O200kCounter::new().unwrap();
    let head = unsplittable(&counter, 1700);
    let tail = prose(&counter, 300);
    let annex = Provision::annex(
        "anx_III",
        "III",
        "ANNEX III — High-risk AI systems referred to in Article 6(2)",
        format!("{head}. {tail}"),
    );

    let chunks = chunk_provisions(&[annex]).unwrap();

    let oversized: Vec<&Chunk> = chunks
        .iter()
        .filter(|c| counter.count_tokens(&c.text) > MAX_TOKENS)
        .collect();
    assert_eq!(oversized.len(), 1);
    assert_eq!(oversized[0].id, "anx_III");
    assert!(oversized[0].text.ends_with(&format!("{head}.")));
    assert!(chunks.len() >= 2);
    assert!(chunks[1..]
        .iter()
        .all(|c| counter.count_tokens(&c.text) <= MAX_TOKENS));
}

#[test]
fn long_article_without_paragraphs_falls_back_to_sentences() {
    let counter = O200kCounter::new().unwrap();
    let text = prose(&counter, 2000);
    let article = Provision::article("art_99", "99", "Article 99 — Penalties", text.clone());

    let chunks = chunk_provisions(&[article]).unwrap();

    assert!(chunks.len() >= 3);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.metadata.chunk_idx, i);
        assert!(chunk.text.starts_with("Article 99 — Penalties\n\n"));
        assert!(counter.count_tokens(&chunk.text) <= MAX_TOKENS);
    }
}

#[test]
fn unknown_types_produce_no_chunks() {
    let mut footnote = Provision::recital("ftn_1", "1", "Footnote 1", "OJ L 123, 1.1.2024, p. 1.");
    footnote.kind = ProvisionKind::Unknown;
    let recital = Provision::recital("rct_1", "1", "Recital 1", "The purpose of this Regulation.");

    let chunks = chunk_provisions(&[footnote, recital]).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].id, "rct_1");
}

#[test]
fn parser_dump_to_index() {
    let counter = O200kCounter::new().unwrap();
    let provisions = vec![
        Provision::article("art_5", "5", "Article 5", "")
            .with_chapter("II", "PROHIBITED AI PRACTICES")
            .with_paragraphs(
                (1..=3)
                    .map(|i| Paragraph::new(format!("005.{i:03}"), prose(&counter, 300)))
                    .collect(),
            ),
        Provision::article("art_6", "6", "Article 6", prose(&counter, 100))
            .with_chapter("III", "HIGH-RISK AI SYSTEMS"),
        Provision::recital("rct_1", "1", "Recital 1", prose(&counter, 50)),
        Provision::annex("anx_I", "I", "ANNEX I", prose(&counter, 1200)),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("provisions.json");
    save_provisions(&provisions, &path).unwrap();
    let loaded = load_provisions(&path).unwrap();
    assert_eq!(loaded, provisions);

    let chunks = chunk_provisions(&loaded).unwrap();
    let mut index = MemoryIndex::new();
    let written = index_chunks(&mut index, &chunks, DEFAULT_BATCH_SIZE).unwrap();
    assert_eq!(written, chunks.len());

    assert_eq!(index.lookup_provision("art_5").len(), 2);
    assert_eq!(
        index.articles_in_chapter("II"),
        vec![("art_5".to_string(), "Article 5".to_string())]
    );

    let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
    for provision in &provisions {
        let text = index.provision_text(&provision.id).unwrap();
        assert_eq!(normalize(&text), normalize(&provision.text), "{}", provision.id);
    }
}
