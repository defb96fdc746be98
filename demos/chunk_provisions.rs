//! Chunking AI Act Provisions
//!
//! Chunks an article, a recital and an annex and prints what an index
//! would receive.
//!
//! ```bash
//! cargo run --example chunk_provisions
//! ```

use lexslab::{chunk_provisions, index_chunks, MemoryIndex, Paragraph, Provision, DEFAULT_BATCH_SIZE};

fn main() -> lexslab::Result<()> {
    let provisions = vec![
        Provision::article("art_50", "50", "Article 50 — Transparency obligations", "")
            .with_chapter("IV", "TRANSPARENCY OBLIGATIONS FOR PROVIDERS AND DEPLOYERS")
            .with_paragraphs(vec![
                Paragraph::new(
                    "050.001",
                    "1. Providers shall ensure that AI systems intended to interact directly with natural persons are designed and developed in such a way that the natural persons concerned are informed that they are interacting with an AI system.",
                ),
                Paragraph::new(
                    "050.002",
                    "2. Providers of AI systems generating synthetic audio, image, video or text content shall ensure that the outputs are marked in a machine-readable format.",
                ),
            ]),
        Provision::recital(
            "rct_1",
            "1",
            "Recital 1",
            "The purpose of this Regulation is to improve the functioning of the internal market by laying down a uniform legal framework.",
        ),
        Provision::annex(
            "anx_III",
            "III",
            "ANNEX III — High-risk AI systems referred to in Article 6(2)",
            "High-risk AI systems pursuant to Article 6(2) are the AI systems listed in any of the following areas: 1. Biometrics; 2. Critical infrastructure; 3. Education and vocational training.",
        ),
    ];

    let chunks = chunk_provisions(&provisions)?;

    println!("Provisions: {}", provisions.len());
    println!("Chunks: {}\n", chunks.len());
    for chunk in &chunks {
        let preview = chunk.body().chars().take(60).collect::<String>();
        println!("[{}] {} \"{}...\"", chunk.id, chunk.metadata.kind, preview);
    }

    let mut index = MemoryIndex::new();
    index_chunks(&mut index, &chunks, DEFAULT_BATCH_SIZE)?;
    println!("\nArticles in chapter IV: {:?}", index.articles_in_chapter("IV"));

    Ok(())
}
