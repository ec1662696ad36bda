// src/catalog/builtin.rs
//! Courses shipped with the service.

use super::CourseRecord;

const GDP_CONTENT: &str = r#"
# 1. What is Gross Domestic Product (GDP)?

Gross Domestic Product (GDP) is the total monetary or market value of all the finished goods and services produced within a country's borders in a specific time period. As a broad measure of overall domestic production, it functions as a comprehensive scorecard of a given country's economic health.

The formula for GDP is:
`GDP = C + G + I + NX`
Where:
- **C** = Consumption (spending by households)
- **G** = Government Spending
- **I** = Investment (business spending)
- **NX** = Net Exports (Exports - Imports)

---

## 2. Real vs. Nominal GDP

**Nominal GDP** is the market value of goods and services produced in an economy, unadjusted for inflation.

**Real GDP** is nominal GDP adjusted for inflation to reflect changes in real output. Economists use real GDP to compare a country's economic output from one year to the next.

---

## 3. Understanding Economic Growth

Economic growth is an increase in the production of economic goods and services, compared from one period of time to another. It can be measured in nominal or real (adjusted for inflation) terms.

Key drivers of economic growth include:
- **Increase in physical capital:** More factories, tools, and machinery.
- **Technological progress:** New, more efficient ways of producing goods.
- **Increase in human capital:** A more educated and skilled workforce.
"#;

const TRADE_CONTENT: &str = r#"
# 1. Core Concepts of International Trade

International Trade is the exchange of goods and services between countries. It allows countries to specialize in what they produce best, leading to greater efficiency and a wider variety of goods for consumers.

**Comparative Advantage** is the key principle. A country should produce goods where it has the lowest *opportunity cost*, even if another country is better at producing everything (absolute advantage).
*   **Example:** If Brazil is great at producing coffee and good at making cars, while the USA is excellent at making cars and okay at growing coffee, both benefit if Brazil focuses on coffee and the USA focuses on cars, and then they trade.

---

# 2. Balance of Trade

The Balance of Trade measures the difference between a country's exports and imports.
*   **Trade Surplus:** Exports > Imports (Positive Balance)
*   **Trade Deficit:** Imports > Exports (Negative Balance)

---

# 3. Trade Barriers

These are policies that restrict trade to protect domestic industries.
*   **Tariffs:** Taxes on imported goods, making them more expensive.
*   **Quotas:** Limits on the quantity of a good that can be imported.
*   **Subsidies:** Government payments to domestic producers to help them compete.

---

# 4. Exchange Rates

The value of a country's currency has a major impact on its trade.
*   **Strong Currency:** Makes imports cheaper for domestic consumers, but makes exports more expensive for foreigners.
*   **Weak Currency:** Makes exports cheaper for foreigners, but makes imports more expensive for domestic consumers.
"#;

pub(super) fn courses() -> Vec<CourseRecord> {
    vec![
        CourseRecord {
            id: "gdp-economic-growth".to_string(),
            title: "GDP and Economic Growth".to_string(),
            description: "Learn how to measure a country's economic output and what drives economic growth.".to_string(),
            content: GDP_CONTENT.to_string(),
        },
        CourseRecord {
            id: "international-trade".to_string(),
            title: "International Trade".to_string(),
            description: "Understanding global trade, comparative advantage, and trade policies.".to_string(),
            content: TRADE_CONTENT.to_string(),
        },
    ]
}
