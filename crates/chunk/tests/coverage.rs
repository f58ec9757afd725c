use chunk::{chunk_policy, hash_text, ChunkConfig, Chunker, PolicyChunk};
use ingest::{PartyType, PolicyDocument};
use segment::build_section_tree;

fn long_policy() -> String {
    let mut text = String::from("Acme Privacy Policy\n\nTable of Contents\n- Data We Collect\n- Sharing\n\n");
    text.push_str("# Data We Collect\n");
    for i in 0..40 {
        text.push_str(&format!(
            "We collect item number {i} when you use the service, including device details.\n"
        ));
    }
    text.push_str("\n## Cookies\n\nCookies help us remember you. ");
    text.push_str(&"Tracking pixels measure engagement across sites. ".repeat(30));
    text.push_str("\nSharing\nWe share data with processors under contract.\n");
    text
}

fn reassemble(text: &str, chunks: &[PolicyChunk]) -> String {
    let mut out = String::new();
    let mut covered = 0;
    for chunk in chunks {
        assert!(chunk.char_start <= covered, "gap before {}", chunk.char_start);
        if chunk.char_end > covered {
            out.push_str(&text[covered..chunk.char_end]);
            covered = chunk.char_end;
        }
    }
    out
}

fn check_document(text: &str, chunker: &Chunker) {
    let doc = PolicyDocument::new("acme-1p", PartyType::FirstParty, text);
    let sections = build_section_tree(text);
    let chunks: Vec<PolicyChunk> = chunker.chunk(&doc).collect();
    let max = chunker.config().max_chunk_bytes;

    assert!(!chunks.is_empty());
    assert_eq!(reassemble(text, &chunks), text);

    let mut previous: Option<&PolicyChunk> = None;
    for chunk in &chunks {
        let section = sections
            .iter()
            .find(|s| s.section_id == chunk.section_id)
            .expect("chunk references a known section");
        assert!(section.start_offset <= chunk.char_start);
        assert!(chunk.char_end <= section.end_offset);
        assert_eq!(chunk.section_path, section.section_path);
        assert_eq!(chunk.policy_id, "acme-1p");
        assert_eq!(chunk.party_type, PartyType::FirstParty);
        assert_eq!(chunk.text, &text[chunk.char_start..chunk.char_end]);
        assert_eq!(chunk.chunk_hash, hash_text(&chunk.text));
        assert!(chunk.len() <= max || chunk.text.chars().count() == 1);

        if let Some(prev) = previous {
            assert!(prev.char_start < chunk.char_start || prev.section_id != chunk.section_id);
            assert!(prev.char_start <= chunk.char_start, "chunks out of order");
        }
        previous = Some(chunk);
    }
}

#[test]
fn default_chunking_covers_long_policy() {
    check_document(&long_policy(), &Chunker::default());
}

#[test]
fn small_windows_cover_long_policy() {
    for (max, overlap, lookback) in [(64, 16, 8), (100, 0, 20), (257, 99, 64), (31, 30, 0)] {
        let chunker = Chunker::new(ChunkConfig {
            max_chunk_bytes: max,
            overlap_bytes: overlap,
            boundary_lookback: lookback,
        })
        .unwrap();
        check_document(&long_policy(), &chunker);
    }
}

#[test]
fn multibyte_text_is_covered() {
    let text = "# Datenschutz\n".to_string() + &"Wir erheben Daten über Ihre Geräte – täglich. ".repeat(60);
    let chunker = Chunker::new(ChunkConfig::default().with_max_chunk_bytes(90).with_overlap_bytes(30))
        .unwrap();
    check_document(&text, &chunker);
}

#[test]
fn long_section_overlaps_within_section() {
    let text = long_policy();
    let doc = PolicyDocument::new("p", PartyType::ThirdParty, text.as_str());
    let chunks: Vec<_> = chunk_policy(&doc).collect();

    let collect_section: Vec<_> = chunks
        .iter()
        .filter(|c| c.section_path == "Data We Collect")
        .collect();
    assert!(collect_section.len() > 1);
    for pair in collect_section.windows(2) {
        assert!(pair[1].char_start < pair[0].char_end, "consecutive windows overlap");
        assert!(pair[0].char_end < pair[1].char_end);
    }
}

#[test]
fn duplicate_text_shares_hash_across_documents() {
    let a = PolicyDocument::new("a", PartyType::FirstParty, "# Contact\nEmail us.\n");
    let b = PolicyDocument::new("b", PartyType::ThirdParty, "# Contact\nEmail us.\n");
    let ha: Vec<_> = chunk_policy(&a).map(|c| c.chunk_hash).collect();
    let hb: Vec<_> = chunk_policy(&b).map(|c| c.chunk_hash).collect();
    assert_eq!(ha, hb);
}

#[test]
fn chunks_serialize_with_party_tags() {
    let doc = PolicyDocument::new("acme", PartyType::ThirdParty, "Hello");
    let chunk = chunk_policy(&doc).next().unwrap();
    let json = serde_json::to_value(&chunk).unwrap();
    assert_eq!(json["party_type"], "3P");
    assert_eq!(json["section_id"], "section_1");
    assert_eq!(json["char_end"], 5);
}
