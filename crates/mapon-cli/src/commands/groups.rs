//! Group and tell-tale commands

use anyhow::Result;
use mapon_client::mapon_core::{UnitGroup, UnitTellTales};
use mapon_client::{
    ListTellTaleValuesRequest, ListUnitGroupsRequest, ListUnitsInGroupRequest, MaponClient,
};
use serde::Serialize;

use crate::output::{
    opt_cell, text_cell, time_cell, GroupRow, GroupUnitRow, OutputContext, TellTaleRow,
};

fn group_rows(group: &UnitGroup) -> Vec<GroupRow> {
    vec![GroupRow {
        id: group.group_id,
        name: text_cell(group.name.as_deref()),
        parent: opt_cell(group.parent_id),
    }]
}

/// List unit groups
pub async fn groups(
    client: &MaponClient,
    request: &ListUnitGroupsRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let groups = client.list_unit_groups(request).await?;
    ctx.print(&groups, group_rows)
}

/// Member of a group as printed in JSON mode
#[derive(Debug, Serialize)]
struct GroupMember {
    unit_id: i64,
}

/// List the units of one group
pub async fn group_units(
    client: &MaponClient,
    request: &ListUnitsInGroupRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let members: Vec<GroupMember> = client
        .list_units_in_group(request)
        .await?
        .into_iter()
        .map(|unit_id| GroupMember { unit_id })
        .collect();

    ctx.print(&members, |m| vec![GroupUnitRow { unit_id: m.unit_id }])
}

fn tell_tale_rows(tell_tales: &UnitTellTales) -> Vec<TellTaleRow> {
    tell_tales
        .values
        .iter()
        .map(|v| TellTaleRow {
            unit_id: tell_tales.unit_id,
            telltale_id: v.telltale_id,
            name: text_cell(v.name.as_deref()),
            value: v.value,
            title: text_cell(v.value_title.as_deref()),
            time: time_cell(v.time.as_ref()),
        })
        .collect()
}

/// Tell-tale history of one unit
pub async fn tell_tales(
    client: &MaponClient,
    request: &ListTellTaleValuesRequest,
    ctx: &OutputContext,
) -> Result<()> {
    let tell_tales = client.list_tell_tale_values(request).await?;
    ctx.print(std::slice::from_ref(&tell_tales), tell_tale_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapon_client::mapon_core::TellTaleValue;

    #[test]
    fn test_group_row_parent() {
        let top = UnitGroup {
            group_id: 1,
            name: Some("All".to_string()),
            parent_id: None,
        };
        assert_eq!(group_rows(&top)[0].parent, "-");

        let child = UnitGroup {
            group_id: 2,
            name: None,
            parent_id: Some(1),
        };
        let row = group_rows(&child).remove(0);
        assert_eq!(row.parent, "1");
        assert_eq!(row.name, "-");
    }

    #[test]
    fn test_tell_tale_rows_one_per_value() {
        let tell_tales = UnitTellTales {
            unit_id: 7,
            values: vec![
                TellTaleValue {
                    telltale_id: 3,
                    value: 1,
                    value_title: Some("Red".to_string()),
                    ..Default::default()
                },
                TellTaleValue {
                    telltale_id: 4,
                    ..Default::default()
                },
            ],
        };

        let rows = tell_tale_rows(&tell_tales);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.unit_id == 7));
        assert_eq!(rows[0].title, "Red");
        assert_eq!(rows[1].time, "-");
    }
}
