use std::collections::HashMap;
use umineko_quote_rust::extractor::{has_words_before_voice, infer_episode};
use umineko_quote_rust::models::{DialogueElement, ExtractedQuote};
use umineko_quote_rust::{detect_truth, parse, Conf, PresetContext, QuoteExtractor, TransformerFactory};

fn extract(text: &str) -> Vec<ExtractedQuote> {
    QuoteExtractor::new().extract_quotes(text)
}

fn extract_one(text: &str) -> ExtractedQuote {
    let quotes = extract(text);
    assert_eq!(quotes.len(), 1, "应该只有一条引言");
    quotes.into_iter().next().expect("应该只有一条引言")
}

#[test]
fn test_single_voice_quote() {
    let quote = extract_one("d [lv 0*\"27\"*\"10100001\"]`{p:1:Test}.`[\\]");
    assert_eq!(quote.character_id, "27");
    assert_eq!(quote.audio_id, "10100001");
    assert_eq!(quote.episode, 1);
    assert_eq!(quote.content_type, "");
    assert!(quote.truth.has_red);
    assert!(!quote.truth.has_blue);
    assert!(quote.audio_character_map.is_none());
    assert!(quote.audio_text_map.is_none());
}

#[test]
fn test_narrator_without_voice() {
    let quote = extract_one("d `Narration here.`[\\]");
    assert!(quote.is_narrator());
    assert_eq!(quote.character_id, "narrator");
    assert_eq!(quote.audio_id, "");
    assert_eq!(quote.episode, 0);
}

#[test]
fn test_words_before_voice_is_narrator() {
    let quote = extract_one("d `The witch laughs.[lv 0*\"27\"*\"10100001\"]Hahaha!`[\\]");
    assert!(quote.is_narrator());
    assert_eq!(quote.audio_id, "");
}

#[test]
fn test_dots_before_voice_keeps_speaker() {
    let quote = extract_one("d `......[lv 0*\"10\"*\"10100001\"]Hmm.`[\\]");
    assert_eq!(quote.character_id, "10");
    assert_eq!(quote.audio_id, "10100001");
}

#[test]
fn test_words_before_nested_voice() {
    let elements = vec![
        DialogueElement::text("..."),
        DialogueElement::tag(
            "p",
            "1",
            vec![
                DialogueElement::voice(0, "27", "10100001"),
                DialogueElement::text("Red."),
            ],
        ),
    ];
    assert!(!has_words_before_voice(&elements));

    let elements = vec![
        DialogueElement::tag("i", "", vec![DialogueElement::text("Quietly")]),
        DialogueElement::voice(0, "27", "10100001"),
    ];
    assert!(has_words_before_voice(&elements));
}

#[test]
fn test_multi_voice_dedup_keeps_order() {
    let quote = extract_one(
        "d [lv 0*\"10\"*\"10100002\"]`One.`[lv 0*\"10\"*\"10100001\"]`Two.`[lv 0*\"10\"*\"10100002\"]`Three.`[\\]",
    );
    assert_eq!(quote.character_id, "10");
    assert_eq!(quote.audio_id, "10100002, 10100001");
    assert_eq!(quote.audio_ids(), vec!["10100002", "10100001"]);
    assert!(quote.audio_character_map.is_none(), "同一角色不应生成角色映射");
    assert!(quote.audio_text_map.is_some());
}

#[test]
fn test_multi_character_map() {
    let quote = extract_one(
        "d [lv 0*\"10\"*\"10100001\"]`Battler!`[lv 0*\"27\"*\"10700001\"]`Beatrice!`[\\]",
    );
    assert_eq!(quote.character_id, "10");
    assert_eq!(quote.episode, 1);

    let mut expected = HashMap::new();
    expected.insert("10100001".to_string(), "10".to_string());
    expected.insert("10700001".to_string(), "27".to_string());
    assert_eq!(quote.audio_character_map, Some(expected));
}

#[test]
fn test_audio_text_map_fragments() {
    let quote = extract_one(
        "d [lv 0*\"10\"*\"10100001\"]`{i:Hello} there`[lv 0*\"10\"*\"10100002\"]`Bye.`[\\]",
    );
    let map = quote.audio_text_map.expect("多段语音应该有文本映射");
    assert_eq!(map.len(), 2);
    assert_eq!(
        map["10100001"],
        vec![
            DialogueElement::tag("i", "", vec![DialogueElement::text("Hello")]),
            DialogueElement::text(" there"),
        ]
    );
    assert_eq!(
        map["10100002"],
        vec![
            DialogueElement::text("Bye."),
            DialogueElement::ClickWait { kind: umineko_quote_rust::models::ClickWaitKind::ClearPage },
        ]
    );
}

#[test]
fn test_audio_text_map_splits_inside_tag() {
    let quote = extract_one(
        "d [lv 0*\"10\"*\"10100001\"]`First part. {p:1:[lv 0*\"27\"*\"10100002\"]Red part.}`",
    );
    let map = quote.audio_text_map.expect("多段语音应该有文本映射");
    assert_eq!(map["10100001"], vec![DialogueElement::text("First part. ")]);
    assert_eq!(map["10100002"], vec![DialogueElement::text("Red part.")]);
    assert!(quote.audio_character_map.is_some());
}

#[test]
fn test_episode_inference() {
    assert_eq!(infer_episode("10100001"), 1);
    assert_eq!(infer_episode("80100001"), 8);
    assert_eq!(infer_episode("90100001"), 0);
    assert_eq!(infer_episode("00100001"), 0);
    assert_eq!(infer_episode("abc"), 0);
    assert_eq!(infer_episode(""), 0);
}

#[test]
fn test_episode_markers_are_sticky() {
    let quotes = extract(
        "new_episode 2\n\
         d [lv 0*\"10\"*\"10100001\"]`A.`\n\
         d `Narration.`\n\
         new_tea 5\n\
         d [lv 0*\"10\"*\"10100002\"]`B.`\n\
         new_ura 6\n\
         d `C.`\n\
         new_episode 7\n\
         d `D.`",
    );
    let summary: Vec<(i32, &str)> = quotes.iter().map(|q| (q.episode, q.content_type.as_str())).collect();
    assert_eq!(
        summary,
        vec![(2, ""), (2, ""), (5, "tea"), (6, "ura"), (7, "")]
    );
}

#[test]
fn test_omake_label_sets_episode() {
    let quotes = extract(
        "*o3_start\n\
         d [lv 0*\"10\"*\"10100001\"]`Hi.`\n\
         *normal_label\n\
         d `Still omake.`",
    );
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].episode, 3);
    assert_eq!(quotes[0].content_type, "omake");
    assert_eq!(quotes[1].episode, 3);
    assert_eq!(quotes[1].content_type, "omake");
}

#[test]
fn test_sequential_presets_detect_both_truths() {
    let quote = extract_one("d [lv 0*\"27\"*\"10100001\"]`{p:2:A} and {p:1:B}`");
    assert!(quote.truth.has_red);
    assert!(quote.truth.has_blue);
    assert!(quote.truth.any());
}

#[test]
fn test_truth_detection_is_recursive() {
    let presets = PresetContext::new();
    let elements = vec![DialogueElement::tag(
        "i",
        "",
        vec![DialogueElement::tag("p", "2", vec![DialogueElement::text("blue")])],
    )];
    let flags = detect_truth(&elements, &presets);
    assert!(!flags.has_red);
    assert!(flags.has_blue);
}

#[test]
fn test_preset_defines_feed_html() {
    let mut extractor = QuoteExtractor::new();
    let quotes = extractor.extract_quotes(
        "preset_define 1,1,-1,#00FF00,0\n\
         preset_define 10,1,-1,#ffffff,0\n\
         preset_define 11,1,-1,#aabbcc,0\n\
         d `{p:11:custom} {p:41:gold} {p:1:red} {p:10:white}`",
    );
    let presets = extractor.presets();
    assert_eq!(presets.dynamic_colour("11"), Some("#AABBCC"));
    assert_eq!(presets.dynamic_colour("1"), None, "语义预设不能被覆盖");
    assert_eq!(presets.dynamic_colour("10"), None, "白色表示不覆盖");

    let factory = TransformerFactory::new(presets);
    let html = factory.html().transform(&quotes[0].content);
    assert_eq!(
        html,
        "<span style=\"color:#AABBCC\">custom</span> \
         <span style=\"color:#FFAA00\">gold</span> \
         <span class=\"red-truth\">red</span> white"
    );
}

#[test]
fn test_presets_reset_between_scripts() {
    let mut extractor = QuoteExtractor::new();
    extractor.extract_quotes("preset_define 12,1,-1,#123456,0\nd `{p:12:x}`");
    assert_eq!(extractor.presets().dynamic_colour("12"), Some("#123456"));

    extractor.extract_quotes("d `{p:12:x}`");
    assert_eq!(extractor.presets().dynamic_colour("12"), None);
    assert_eq!(extractor.presets().dynamic_colour("42"), Some("#AA71FF"));
}

#[test]
fn test_conf_presets_and_depth() {
    let conf = Conf::from_json_str(r##"{"default_dynamic_colours": {"50": "#010203"}, "max_nesting_depth": 1}"##)
        .expect("配置应该能解析");
    let mut extractor = QuoteExtractor::from_conf(&conf);
    let quote = extractor
        .extract_quotes("d `{p:50:{i:{c:FF0000:deep}}}`")
        .into_iter()
        .next()
        .expect("应该有引言");
    assert_eq!(extractor.presets().dynamic_colour("50"), Some("#010203"));
    assert_eq!(extractor.presets().dynamic_colour("41"), None);
    assert_eq!(
        quote.content,
        vec![DialogueElement::tag(
            "p",
            "50",
            vec![DialogueElement::tag("i", "", vec![DialogueElement::text("{c:FF0000:deep}")])]
        )]
    );
}

#[test]
fn test_extract_from_parsed_script() {
    let script = parse("d `a`\nbg black\nd `b`");
    let quotes = QuoteExtractor::new().extract_from_script(&script);
    assert_eq!(quotes.len(), 2);
    assert!(quotes.iter().all(ExtractedQuote::is_narrator));
}
