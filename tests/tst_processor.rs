use nbn_analyzer::models::{AllIndices, LiveIndex, MarketStatus, OptionData};
use nbn_analyzer::processor::{
    capital_market_state, extract_ohlc, filter_nearby, find_index_quote, month_expiry,
    nearest_strikes,
};
use nbn_analyzer::{NBNError, Ohlc};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(strike: f64, expiry: &str) -> OptionData {
        serde_json::from_value(json!({
            "strikePrice": strike,
            "expiryDate": expiry,
            "CE": {"openInterest": 10.0, "lastPrice": 5.0, "impliedVolatility": 12.5, "totalTradedVolume": 100},
            "PE": {"openInterest": 20.0, "lastPrice": 4.0}
        }))
        .unwrap()
    }

    fn expiries(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_ohlc_matches_index_row() {
        let live: LiveIndex = serde_json::from_value(json!({
            "name": "NIFTY 50",
            "data": [
                {"symbol": "RELIANCE", "open": 1.0, "dayHigh": 2.0, "dayLow": 0.5, "lastPrice": 1.5},
                {"symbol": "NIFTY 50", "priority": 1, "open": 25700.5, "dayHigh": 25890.0,
                 "dayLow": 25650.25, "lastPrice": 25810.75, "previousClose": 25690.0}
            ],
            "metadata": {"indexName": "NIFTY 50"}
        }))
        .unwrap();

        let ohlc = extract_ohlc(&live, "NIFTY 50").unwrap();
        assert_eq!(ohlc, Ohlc::new(25700.5, 25890.0, 25650.25, 25810.75));
    }

    #[test]
    fn test_extract_ohlc_falls_back_to_first_row() {
        let live: LiveIndex = serde_json::from_value(json!({
            "data": [{"symbol": "NIFTY50", "open": 1.0, "dayHigh": 2.0, "dayLow": 0.5, "lastPrice": 1.5}]
        }))
        .unwrap();
        assert_eq!(extract_ohlc(&live, "NIFTY 50").unwrap().close, 1.5);
    }

    #[test]
    fn test_extract_ohlc_errors() {
        let empty: LiveIndex = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(matches!(extract_ohlc(&empty, "NIFTY 50"), Err(NBNError::MissingRecord(_))));

        let partial: LiveIndex = serde_json::from_value(json!({
            "data": [{"symbol": "NIFTY 50", "open": 1.0, "dayHigh": 2.0, "lastPrice": 1.5}]
        }))
        .unwrap();
        assert!(matches!(extract_ohlc(&partial, "NIFTY 50"), Err(NBNError::MissingRecord(_))));
    }

    #[test]
    fn test_live_index_keeps_unknown_fields() {
        let live: LiveIndex = serde_json::from_value(json!({
            "name": "NIFTY BANK",
            "timestamp": "19-Oct-2026 15:30:00",
            "data": [{"symbol": "NIFTY BANK", "open": 1.0, "pChange": 0.4}]
        }))
        .unwrap();
        let back = serde_json::to_value(&live).unwrap();
        assert_eq!(back["timestamp"], "19-Oct-2026 15:30:00");
        assert_eq!(back["data"][0]["pChange"], 0.4);
    }

    #[test]
    fn test_capital_market_state() {
        let status: MarketStatus = serde_json::from_value(json!({
            "marketState": [
                {"market": "Currency", "marketStatus": "Closed"},
                {"market": "Capital Market", "marketStatus": "Open", "index": "NIFTY 50", "last": 25810.75}
            ]
        }))
        .unwrap();
        let state = capital_market_state(&status).unwrap();
        assert_eq!(state.market_status.as_deref(), Some("Open"));

        let none: MarketStatus = serde_json::from_value(json!({"marketState": []})).unwrap();
        assert!(capital_market_state(&none).is_err());
    }

    #[test]
    fn test_find_index_quote() {
        let indices: AllIndices = serde_json::from_value(json!({
            "data": [
                {"index": "NIFTY NEXT 50", "last": 68000.0},
                {"index": "NIFTY 50", "last": 25810.75, "open": 25700.5}
            ]
        }))
        .unwrap();
        assert_eq!(find_index_quote(&indices, "NIFTY 50").unwrap().last, Some(25810.75));
        assert!(find_index_quote(&indices, "NIFTY BANK").is_err());
    }

    #[test]
    fn test_nearest_strikes() {
        let strikes = [25600.0, 25650.0, 25700.0, 25750.0, 25800.0, 25850.0, 25900.0];
        assert_eq!(nearest_strikes(&strikes, 25760.0, 2), vec![25750.0, 25800.0]);
        assert_eq!(nearest_strikes(&strikes, 25760.0, 4), vec![25750.0, 25800.0, 25700.0, 25850.0]);
        assert_eq!(nearest_strikes(&strikes, 20000.0, 1), vec![25600.0]);
        assert_eq!(nearest_strikes(&strikes, 25760.0, 50).len(), strikes.len());
    }

    #[test]
    fn test_nearest_strikes_ignores_duplicates() {
        let strikes = [100.0, 100.0, 105.0, 110.0];
        assert_eq!(nearest_strikes(&strikes, 101.0, 2), vec![100.0, 105.0]);
    }

    #[test]
    fn test_month_expiry() {
        let list = expiries(&["02-Oct-2026", "09-Oct-2026", "29-Oct-2026", "26-Nov-2026"]);
        assert_eq!(month_expiry(&list).unwrap(), Some("29-Oct-2026".to_string()));

        // nearest is already the last of its month
        let list = expiries(&["29-Oct-2026", "05-Nov-2026", "26-Nov-2026"]);
        assert_eq!(month_expiry(&list).unwrap(), Some("29-Oct-2026".to_string()));

        assert_eq!(month_expiry(&[]).unwrap(), None);
        assert!(month_expiry(&expiries(&["2026-10-29"])).is_err());
    }

    #[test]
    fn test_filter_nearby_keeps_order() {
        let nearest = vec![row(100.0, "02-Oct-2026"), row(105.0, "02-Oct-2026"), row(110.0, "02-Oct-2026")];
        let month = vec![row(100.0, "29-Oct-2026"), row(110.0, "29-Oct-2026")];

        let filtered = filter_nearby(&nearest, &month, &[110.0, 105.0]);
        let picked: Vec<(f64, Option<&str>)> = filtered
            .iter()
            .map(|r| (r.strike_price, r.expiry_date.as_deref()))
            .collect();
        assert_eq!(
            picked,
            vec![
                (105.0, Some("02-Oct-2026")),
                (110.0, Some("02-Oct-2026")),
                (110.0, Some("29-Oct-2026")),
            ]
        );
        assert_eq!(filtered[0].call.as_ref().unwrap().iv, Some(12.5));
    }

    #[test]
    fn test_filter_nearby_without_month_rows() {
        let nearest = vec![row(100.0, "29-Oct-2026"), row(105.0, "29-Oct-2026")];
        let filtered = filter_nearby(&nearest, &[], &[100.0, 105.0]);
        assert_eq!(filtered, nearest);
    }
}
