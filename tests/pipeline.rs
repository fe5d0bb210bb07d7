/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! End-to-end: CDL text to equations, then answer checking.

use geo_cdl::{
    EquivalenceOptions, Expr, ExpressionNode, Method, ParsedPredicate, ProblemSymbols, Verdict,
    equation, equivalent, parse_equal_predicate, parse_expression_tree, parse_predicate,
    rough_equal,
};
use std::collections::HashMap;

const TEXT_CDL: [&str; 4] = [
    "Equal(LengthOfLine(AB),12)",
    "Equal(LengthOfLine(BC),x+4)",
    "Equal(MeasureOfAngle(ABC),90)",
    "Equal(Add(LengthOfLine(AB),LengthOfLine(BC)),Mul(2,x))",
];

/// Registers every attribute the statements mention, the way a solver would
/// before asking for equations.
fn symbols_for(sources: &[&str]) -> ProblemSymbols {
    let mut symbols = ProblemSymbols::new()
        .declare("LengthOfLine", "ll", 2)
        .declare("MeasureOfAngle", "ma", 3)
        .bind_free("x");
    for source in sources {
        let (_, attrs) = parse_equal_predicate(source, false).unwrap();
        for attr in attrs {
            symbols.insert(&attr.name, &attr.point_string());
        }
    }
    symbols
}

#[test]
fn statements_compile_to_zero_at_the_solution() {
    let symbols = symbols_for(&TEXT_CDL);
    assert_eq!(symbols.len(), 4);

    // AB = 12, BC = x + 4, AB + BC = 2x  =>  x = 16, BC = 20
    let solution = HashMap::from([
        ("ll_ab".to_string(), 12.0),
        ("ll_bc".to_string(), 20.0),
        ("ma_abc".to_string(), 90.0),
        ("f_x".to_string(), 16.0),
    ]);
    for source in TEXT_CDL {
        let (statement, _) = parse_equal_predicate(source, false).unwrap();
        let eq = equation(&statement, &symbols).unwrap().unwrap();
        assert_eq!(eq.eval(&solution), Ok(0.0), "{source}");
    }
}

#[test]
fn unregistered_attributes_are_skipped() {
    let symbols = symbols_for(&TEXT_CDL[..1]);
    let (statement, _) = parse_equal_predicate(TEXT_CDL[1], false).unwrap();
    assert_eq!(equation(&statement, &symbols).unwrap(), None);
}

#[test]
fn compiled_answers_feed_the_oracle() {
    let symbols = symbols_for(&TEXT_CDL);
    let (statement, _) =
        parse_equal_predicate("Equal(Pow(LengthOfLine(AB),2),Mul(LengthOfLine(AB),LengthOfLine(AB)))", false)
            .unwrap();
    let eq = equation(&statement, &symbols).unwrap().unwrap();
    assert!(equivalent(&eq.to_string(), "0"));
}

#[test]
fn answer_checking() {
    assert!(equivalent("847/3", "847/3"));
    assert!(!equivalent("847/3", "282.333"));
    assert!(equivalent("5*(5*x+7)/(2*x+3)", "(25*x+35)/(2*x+3)"));
    assert!(!equivalent("5*(5*x+7)/(2*x+3)", "5*x+7"));
    assert!(equivalent("2 * pi * r", "pi*r*2"));
    assert!(rough_equal("282.333", "282.6", 0.5));
    assert!(!rough_equal("282", "283", 0.5));
}

#[test]
fn serde_round_trips() {
    let predicate = parse_predicate("Parallel(AB,CD)", false).unwrap();
    let json = serde_json::to_string(&predicate).unwrap();
    let back: ParsedPredicate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, predicate);

    let (tree, _) = parse_expression_tree("Add(LengthOfLine(OA),x+1)", false).unwrap();
    let json = serde_json::to_string(&tree).unwrap();
    let back: ExpressionNode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);

    let options: EquivalenceOptions = serde_json::from_str(r#"{"trials": 8, "seed": 3}"#).unwrap();
    assert_eq!(options.trials, 8);
    assert_eq!(options.seed, Some(3));
    assert_eq!(options.tolerance, 1e-10);

    let verdict = Verdict { equal: true, method: Method::Sampling };
    let json = serde_json::to_value(verdict).unwrap();
    assert_eq!(json["method"], "Sampling");
}

#[test]
fn expressions_print_reparseably() {
    let x = Expr::sym("x");
    let e = Expr::div(Expr::add(x.clone(), Expr::one()), Expr::mul(Expr::int(2), x));
    assert!(equivalent(&e.to_string(), "(x+1)/(2*x)"));
}
