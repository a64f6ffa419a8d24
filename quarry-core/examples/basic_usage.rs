use quarry_core::{table, BuildOptions, QueryBuilder};

fn main() -> quarry_core::Result<()> {
    // Columns and predicates can be passed one at a time or as lists
    let select_query = table("tips")?
        .where_("total_bill > 10")
        .select(["tip", "total_bill", "day AS weekday"])
        .order_by("tip")
        .limit(10);

    println!("SELECT SQL:\n{}\n", select_query);

    // GROUP BY columns are added to the SELECT list when missing
    let grouped = table("tips")?
        .group_by(["day", "time"])
        .select(["MAX(tip) AS tip_max", "MIN(tip) AS tip_min"]);

    println!("Grouped SQL:\n{}\n", grouped.build());

    // where_ joins with AND, or_where with OR, in call order
    let filtered = table("tips")?
        .where_("tip < 10")
        .or_where("total_bill > 10")
        .and_where("smoker = 'No'");

    println!("Filtered SQL:\n{}\n", filtered.build());

    // CTEs are other builders registered under an alias
    let with_ctes = table("daily")?
        .cte(grouped.clone(), "daily")?
        .cte(table("weather")?.select(["day", "rain"]), "weather")?
        .select("*");

    println!("CTE SQL:\n{}\n", with_ctes.build());

    // Options can come from JSON configuration
    let options = BuildOptions::from_json(r#"{"group_by_in_select": false}"#)?;
    let plain = QueryBuilder::with_options("tips", options)?
        .group_by("day")
        .select("COUNT(*)");

    println!("Without group-by merge:\n{}\n", plain.build());

    // Query definitions can be stored and reloaded
    let json = with_ctes.to_json()?;
    let reloaded = QueryBuilder::from_json(&json)?;
    println!("Reloaded SQL matches: {}", reloaded.build() == with_ctes.build());

    Ok(())
}
