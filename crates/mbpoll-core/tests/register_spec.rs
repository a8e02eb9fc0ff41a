use mbpoll_core::{Format, SpecError, decode, parse};

const WIDE: [&str; 3] = ["S", "U", "f"];
const NARROW: [&str; 4] = ["s", "u", "b", "a"];

#[test]
fn every_valid_range_parses_to_itself() {
    for start in (40000i64..=49999).step_by(7).chain([49999]) {
        for count in 1i64..=125 {
            let result = parse(&start.to_string(), &count.to_string(), "u");
            if start + count - 1 > 49999 {
                assert!(
                    matches!(result, Err(SpecError::RangeExceeded { .. })),
                    "{start},{count}"
                );
                continue;
            }
            let plan = result.unwrap_or_else(|err| panic!("{start},{count}: {err}"));
            assert_eq!(i64::from(plan.start_address()), start);
            assert_eq!(i64::from(plan.register_count()), count);
        }
    }
}

#[test]
fn end_address_form_matches_count_form() {
    for start in [40001i64, 41234, 49876] {
        for count in [1i64, 2, 17, 124] {
            let end = start + count - 1;
            for letter in NARROW.iter().chain(WIDE.iter()) {
                let by_count = parse(&start.to_string(), &count.to_string(), letter).unwrap();
                let by_end = parse(&start.to_string(), &end.to_string(), letter).unwrap();
                assert_eq!(by_count, by_end, "{start},{count},{letter}");
            }
        }
    }
}

#[test]
fn odd_counts_round_up_for_wide_formats() {
    for k in 0i64..=62 {
        let odd = 2 * k + 1;
        for letter in WIDE {
            let result = parse("40001", &odd.to_string(), letter);
            if odd + 1 > 125 {
                assert_eq!(result.unwrap_err(), SpecError::InvalidCount { count: odd + 1 });
            } else {
                assert_eq!(i64::from(result.unwrap().register_count()), odd + 1);
            }
        }
        for letter in NARROW {
            let plan = parse("40001", &odd.to_string(), letter).unwrap();
            assert_eq!(i64::from(plan.register_count()), odd);
        }
    }
}

#[test]
fn invalid_format_fails_before_range_checks() {
    assert!(matches!(
        parse("12", "99999", "x"),
        Err(SpecError::InvalidFormat { .. })
    ));
}

#[test]
fn decoded_values_cover_the_plan() {
    let words: Vec<u16> = (0..125).collect();
    for letter in NARROW.iter().chain(WIDE.iter()) {
        let plan = parse("40001", "124", letter).unwrap();
        let values = decode(&plan, &words, 40001)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(values.len(), usize::from(plan.value_count()), "{letter}");

        let step = plan.format().words_per_value() as u32;
        for (i, value) in values.iter().enumerate() {
            assert_eq!(value.address, 40001 + i as u32 * step);
        }
        if plan.format() == Format::UnsignedShort {
            assert_eq!(values[123].text, "123");
        }
    }
}
