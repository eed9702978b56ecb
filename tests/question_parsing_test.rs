use docquiz::document::{segment_questions, split_spans, SegmentTier};
use docquiz::{process_questions, AnswerOption, AssetMap};

#[cfg(test)]
mod segmentation_tests {
    use super::*;

    #[test]
    fn test_n_headers_give_n_spans_in_order() {
        let text: String = (1..=12)
            .map(|n| format!("{n}. Тип {n} № [[{}]] Вопрос номер {n}\nОтвет: {n}.\n", 1000 + n))
            .collect();

        let seg = segment_questions(&text);
        assert_eq!(seg.tier, Some(SegmentTier::Structured));
        assert_eq!(seg.starts.len(), 12);
        assert!(
            seg.starts.windows(2).all(|w| w[0].offset < w[1].offset),
            "Offsets should be strictly increasing"
        );

        let spans = split_spans(&text, &seg.starts);
        for (i, span) in spans.iter().enumerate() {
            assert!(span.text.starts_with(&format!("{}. Тип", i + 1)));
        }
    }

    #[test]
    fn test_cascade_is_not_combined() {
        // Tier one matches a single header; the loose headers around it must
        // not become extra questions
        let text = "1. Тип 1 intro\n2. Тип 5 № [[77]] real question\n3. Тип 1 trailing\n";
        let result = process_questions(text, &AssetMap::new());

        assert_eq!(result.total_questions, 1);
        assert_eq!(result.questions[0].id, 2);
        assert!(result.questions[0].text.contains("3. Тип 1 trailing"));
    }

    #[test]
    fn test_second_tier_only_after_first_finds_nothing() {
        let text = "5. Тип A\nfirst\n6. Тип B\nsecond\n";
        assert!(docquiz::document::parsing::segment::find_header_offsets(
            text,
            SegmentTier::Structured
        )
        .is_empty());

        let result = process_questions(text, &AssetMap::new());
        let ids: Vec<u32> = result.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![5, 6]);
        assert_eq!(result.questions[0].text, "first");
    }
}

#[cfg(test)]
mod field_tests {
    use super::*;

    #[test]
    fn test_end_to_end_scenario() {
        let text = "1. Тип 5 № [[100]] What is 2+2?\n1) 3\n2) 4\nОтвет: 2.\n";
        let result = process_questions(text, &AssetMap::new());

        assert_eq!(result.total_questions, 1);
        let question = &result.questions[0];
        assert_eq!(question.id, 1);
        assert_eq!(question.correct_answer.as_deref(), Some("2"));
        assert_eq!(
            question.options,
            vec![
                AnswerOption { number: 1, text: "3".to_string() },
                AnswerOption { number: 2, text: "4".to_string() },
            ]
        );
        assert_eq!(question.text, "What is 2+2?");
    }

    #[test]
    fn test_zero_headers_scenario() {
        let result = process_questions("Nothing to see.\n1) stray option\n", &AssetMap::new());

        assert_eq!(result.total_questions, 0);
        assert!(result.questions.is_empty());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({ "total_questions": 0, "questions": [] })
        );
    }

    #[test]
    fn test_options_are_not_renumbered() {
        let text = "8. Тип 4 № [[31]] Выберите верные утверждения.\n\
                    2) первое\n4) второе\n5) третье\nОтвет: 45.\n";
        let result = process_questions(text, &AssetMap::new());
        let question = &result.questions[0];

        let numbers: Vec<u32> = question.options.iter().map(|o| o.number).collect();
        assert_eq!(numbers, vec![2, 4, 5]);
        assert_eq!(question.correct_answer.as_deref(), Some("45"));
        assert_eq!(question.text, "Выберите верные утверждения.");
    }

    #[test]
    fn test_unresolved_placeholder_stays_literal() {
        let text = "1. Тип 1 № [[1]] See [IMAGE_4]\n";
        let result = process_questions(text, &AssetMap::new());

        assert!(!result.questions[0].has_image);
        assert!(result.questions[0].images.is_empty());
        assert_eq!(result.questions[0].text, "See [IMAGE_4]");
    }
}
