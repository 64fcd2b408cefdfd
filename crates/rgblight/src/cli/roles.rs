//! `roles` subcommand: list the roles the controller handles.

use super::{Result, RoleJson, RolesOutput, controller};

pub(super) fn cmd_roles(json: bool) -> Result<()> {
    if json {
        let output = RolesOutput {
            roles: controller::SUPPORTED_ROLES
                .iter()
                .map(|r| RoleJson {
                    id: r.id(),
                    name: r.name(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for role in controller::SUPPORTED_ROLES {
        println!("{:>2}  {role}", role.id());
    }
    Ok(())
}
